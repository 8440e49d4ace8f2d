use crate::{
    audio::system::AudioSystem,
    event::events::Event,
    http::ApiService,
    library::{
        catalog::Catalog,
        favorites::FavoritesStore,
        filter::{ArtistGroup, ViewState, filter_view},
        song::Song,
    },
};
use flume::Sender;
use std::sync::Arc;

/// Everything the UI reads and the input handlers mutate.
pub struct AppContext {
    pub api: Arc<ApiService>,
    pub catalog: Catalog,
    pub favorites: FavoritesStore,
    pub audio_system: AudioSystem,
    pub event_tx: Sender<Event>,
}

impl AppContext {
    pub fn visible_groups(&self, view: &ViewState) -> Vec<ArtistGroup<'_>> {
        filter_view(self.catalog.songs(), view, &self.favorites.ids())
    }

    /// Visible song at `position`, counted across groups.
    pub fn visible_song(&self, view: &ViewState, position: usize) -> Option<&Song> {
        self.visible_groups(view)
            .into_iter()
            .flat_map(|group| group.songs)
            .nth(position)
    }

    pub fn visible_count(&self, view: &ViewState) -> usize {
        self.visible_groups(view)
            .iter()
            .map(|group| group.songs.len())
            .sum()
    }
}
