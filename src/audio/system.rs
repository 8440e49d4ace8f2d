use std::{sync::Arc, time::Duration};

use flume::Sender;
use tracing::debug;

use crate::{
    audio::{
        config::AudioConfig,
        controller::PlaybackController,
        media::RodioMedia,
        playback::PlaybackEngine,
        progress::{TimeDisplay, TrackProgress},
        state::Transition,
        traits::MediaElement,
    },
    event::events::Event,
    http::ApiService,
    library::{catalog::Catalog, song::Song},
};

/// Playback controller wired to the real output device, plus the stepping
/// rules for keyboard volume and seek controls.
pub struct AudioSystem {
    controller: PlaybackController<RodioMedia>,
    config: AudioConfig,
}

impl AudioSystem {
    pub fn new(
        event_tx: Sender<Event>,
        api: &ApiService,
        config: AudioConfig,
    ) -> color_eyre::Result<Self> {
        let engine = PlaybackEngine::new()?;
        let media = RodioMedia::new(
            engine,
            api.client.clone(),
            event_tx,
            Duration::from_millis(config.monitor_interval_ms),
        );
        let controller = PlaybackController::new(
            media,
            api.base_url().clone(),
            config.volume.min(100) as f32 / 100.0,
        );

        Ok(Self { controller, config })
    }

    pub fn play(&mut self, catalog: &Catalog, index: usize) -> Transition {
        self.controller.play(catalog, index)
    }

    pub fn play_pause(&mut self, catalog: &Catalog) -> Transition {
        self.controller.toggle_play(catalog)
    }

    pub fn play_next(&mut self, catalog: &Catalog) -> Transition {
        self.controller.next(catalog)
    }

    pub fn play_previous(&mut self, catalog: &Catalog) -> Transition {
        self.controller.prev(catalog)
    }

    pub fn on_track_ended(&mut self, catalog: &Catalog, generation: u64) -> Transition {
        let progress = self.track_progress().clone();
        end_of_source(&mut self.controller, &progress, catalog, generation)
    }

    pub fn on_catalog_replaced(&mut self, catalog: &Catalog) -> Transition {
        self.controller.sync_catalog(catalog)
    }

    pub fn seek_to(&mut self, fraction: f64) -> Transition {
        self.controller.seek(fraction)
    }

    pub fn seek_forwards(&mut self) -> Transition {
        self.controller
            .seek_forwards(Duration::from_secs(self.config.seek_step_secs))
    }

    pub fn seek_backwards(&mut self) -> Transition {
        self.controller
            .seek_backwards(Duration::from_secs(self.config.seek_step_secs))
    }

    pub fn volume_up(&mut self) -> Transition {
        let volume = self.volume().saturating_add(self.config.volume_step);
        self.set_volume(volume)
    }

    pub fn volume_down(&mut self) -> Transition {
        let volume = self.volume().saturating_sub(self.config.volume_step);
        self.set_volume(volume)
    }

    pub fn set_volume(&mut self, volume: u8) -> Transition {
        self.controller.set_volume(volume.min(100) as f32 / 100.0)
    }

    /// Volume as a whole percentage.
    pub fn volume(&self) -> u8 {
        (self.controller.volume() * 100.0).round() as u8
    }

    pub fn time_display(&self) -> Option<TimeDisplay> {
        self.controller.on_time_update()
    }

    pub fn current_song<'a>(&self, catalog: &'a Catalog) -> Option<&'a Song> {
        self.controller.current_song(catalog)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.controller.current_index()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn track_progress(&self) -> &Arc<TrackProgress> {
        self.controller.media().progress()
    }
}

/// Ends the current song unless the notification came from a source that a
/// later load has already replaced.
fn end_of_source<M: MediaElement>(
    controller: &mut PlaybackController<M>,
    progress: &TrackProgress,
    catalog: &Catalog,
    generation: u64,
) -> Transition {
    if !progress.is_current(generation) {
        debug!(generation, "stale end of stream ignored");
        return Transition::Ignored;
    }
    controller.on_ended(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    #[derive(Default)]
    struct SilentMedia {
        loads: usize,
    }

    impl MediaElement for SilentMedia {
        fn load(&mut self, _url: &str) {
            self.loads += 1;
        }
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn duration(&self) -> Option<Duration> {
            None
        }
        fn current_time(&self) -> Duration {
            Duration::ZERO
        }
        fn set_current_time(&mut self, _position: Duration) {}
        fn set_volume(&mut self, _volume: f32) {}
    }

    fn catalog() -> Catalog {
        Catalog::from_songs(vec![
            Song::new("1", "One", None),
            Song::new("2", "Two", None),
            Song::new("3", "Three", None),
        ])
    }

    #[test]
    fn end_from_replaced_source_does_not_advance() {
        let catalog = catalog();
        let progress = TrackProgress::new();
        let mut controller = PlaybackController::new(
            SilentMedia::default(),
            Url::parse("http://localhost:8080").unwrap(),
            1.0,
        );

        let first = progress.reset();
        let _ = controller.play(&catalog, 0);
        // user skips before the first source's end is handled
        let second = progress.reset();
        let _ = controller.next(&catalog);

        assert_eq!(
            end_of_source(&mut controller, &progress, &catalog, first),
            Transition::Ignored
        );
        assert_eq!(controller.current_index(), Some(1));
        assert_eq!(controller.media().loads, 2);

        assert_eq!(
            end_of_source(&mut controller, &progress, &catalog, second),
            Transition::Changed
        );
        assert_eq!(controller.current_index(), Some(2));
        assert_eq!(controller.media().loads, 3);
    }
}
