use std::collections::HashSet;

use crate::library::song::Song;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Favorites,
    Library,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Favorites, View::Library];

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Favorites => "Favorites",
            View::Library => "Library",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub active_view: View,
    pub search_term: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistGroup<'a> {
    pub artist: &'a str,
    pub songs: Vec<&'a Song>,
}

fn matches_term(song: &Song, term: &str) -> bool {
    song.name.to_lowercase().contains(term)
        || song
            .artist
            .as_deref()
            .is_some_and(|artist| artist.to_lowercase().contains(term))
}

/// Songs visible for the given view and search term, grouped by artist in
/// order of first appearance.
pub fn filter_view<'a>(
    catalog: &'a [Song],
    view: &ViewState,
    favorites: &HashSet<String>,
) -> Vec<ArtistGroup<'a>> {
    let term = view.search_term.to_lowercase();

    let visible = catalog
        .iter()
        .filter(|song| match view.active_view {
            View::Home | View::Library => true,
            View::Favorites => favorites.contains(&song.id),
        })
        .filter(|song| term.is_empty() || matches_term(song, &term));

    let mut groups: Vec<ArtistGroup<'a>> = Vec::new();
    for song in visible {
        let artist = song.display_artist();
        match groups.iter_mut().find(|g| g.artist == artist) {
            Some(group) => group.songs.push(song),
            None => groups.push(ArtistGroup {
                artist,
                songs: vec![song],
            }),
        }
    }

    groups
}
