use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

use crate::{
    audio::{
        progress::TimeDisplay,
        state::{PlaybackState, Transition},
        traits::MediaElement,
    },
    http::stream_url,
    library::{catalog::Catalog, song::Song},
};

/// Owns the playback state and the media element. Catalog lookups are passed
/// in so the controller never holds a stale copy of the song list.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    base_url: Url,
    state: PlaybackState,
    volume: f32,
    /// Set when the last song ran out; the media has nothing left to resume.
    ended: bool,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(mut media: M, base_url: Url, volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        media.set_volume(volume);

        Self {
            media,
            base_url,
            state: PlaybackState::default(),
            volume,
            ended: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn current_song<'a>(&self, catalog: &'a Catalog) -> Option<&'a Song> {
        self.state
            .current_index
            .and_then(|index| catalog.get(index).ok())
    }

    pub fn play(&mut self, catalog: &Catalog, index: usize) -> Transition {
        let song = match catalog.get(index) {
            Ok(song) => song,
            Err(e) => {
                debug!(error = %e, "play ignored");
                return Transition::Ignored;
            }
        };

        self.state.current_index = Some(index);
        let url = stream_url(&self.base_url, &song.id);
        info!(index, id = %song.id, name = %song.name, "playing song");

        self.media.load(url.as_str());
        self.media.play();
        self.state.is_playing = true;
        self.ended = false;
        Transition::Changed
    }

    pub fn toggle_play(&mut self, catalog: &Catalog) -> Transition {
        match self.state.current_index {
            None if catalog.is_empty() => Transition::Ignored,
            None => self.play(catalog, 0),
            Some(index) if self.ended => self.play(catalog, index),
            Some(_) => {
                if self.state.is_playing {
                    self.media.pause();
                    self.state.is_playing = false;
                } else {
                    self.media.play();
                    self.state.is_playing = true;
                }
                Transition::Changed
            }
        }
    }

    pub fn next(&mut self, catalog: &Catalog) -> Transition {
        match self.state.current_index {
            Some(index) if index + 1 < catalog.len() => self.play(catalog, index + 1),
            _ => Transition::Ignored,
        }
    }

    pub fn prev(&mut self, catalog: &Catalog) -> Transition {
        match self.state.current_index {
            Some(index) if index > 0 => self.play(catalog, index - 1),
            _ => Transition::Ignored,
        }
    }

    /// Media reached the end of the current song. Advances, or stops at the
    /// last song.
    pub fn on_ended(&mut self, catalog: &Catalog) -> Transition {
        if self.next(catalog).is_changed() {
            return Transition::Changed;
        }

        if self.state.is_playing {
            info!("end of catalog reached, stopping");
            self.state.is_playing = false;
            self.ended = true;
            Transition::Changed
        } else {
            Transition::Ignored
        }
    }

    /// `fraction` of the current song's length, clamped to [0, 1].
    pub fn seek(&mut self, fraction: f64) -> Transition {
        let Some(duration) = self.media.duration() else {
            return Transition::Ignored;
        };
        if !fraction.is_finite() || self.state.current_index.is_none() {
            return Transition::Ignored;
        }

        let position = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.media.set_current_time(position);
        Transition::Changed
    }

    pub fn seek_forwards(&mut self, step: Duration) -> Transition {
        match self.media.duration() {
            Some(duration) if !duration.is_zero() => {
                let target = self.media.current_time().saturating_add(step);
                self.seek(target.as_secs_f64() / duration.as_secs_f64())
            }
            _ => Transition::Ignored,
        }
    }

    pub fn seek_backwards(&mut self, step: Duration) -> Transition {
        match self.media.duration() {
            Some(duration) if !duration.is_zero() => {
                let target = self.media.current_time().saturating_sub(step);
                self.seek(target.as_secs_f64() / duration.as_secs_f64())
            }
            _ => Transition::Ignored,
        }
    }

    pub fn set_volume(&mut self, volume: f32) -> Transition {
        if !volume.is_finite() {
            return Transition::Ignored;
        }

        self.volume = volume.clamp(0.0, 1.0);
        self.media.set_volume(self.volume);
        Transition::Changed
    }

    pub fn on_time_update(&self) -> Option<TimeDisplay> {
        let duration = self.media.duration()?;
        TimeDisplay::new(self.media.current_time(), duration)
    }

    /// Called after the catalog is replaced; drops a selection that no longer
    /// points inside it.
    pub fn sync_catalog(&mut self, catalog: &Catalog) -> Transition {
        match self.state.current_index {
            Some(index) if index >= catalog.len() => {
                if self.state.is_playing {
                    self.media.pause();
                }
                self.state = PlaybackState::default();
                self.ended = false;
                Transition::Changed
            }
            _ => Transition::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum MediaCall {
        Load(String),
        Play,
        Pause,
        Seek(Duration),
        Volume(f32),
    }

    #[derive(Default)]
    struct FakeMedia {
        calls: Vec<MediaCall>,
        duration: Option<Duration>,
        position: Duration,
    }

    impl MediaElement for FakeMedia {
        fn load(&mut self, url: &str) {
            self.calls.push(MediaCall::Load(url.to_string()));
        }

        fn play(&mut self) {
            self.calls.push(MediaCall::Play);
        }

        fn pause(&mut self) {
            self.calls.push(MediaCall::Pause);
        }

        fn duration(&self) -> Option<Duration> {
            self.duration
        }

        fn current_time(&self) -> Duration {
            self.position
        }

        fn set_current_time(&mut self, position: Duration) {
            self.position = position;
            self.calls.push(MediaCall::Seek(position));
        }

        fn set_volume(&mut self, volume: f32) {
            self.calls.push(MediaCall::Volume(volume));
        }
    }

    fn catalog(len: usize) -> Catalog {
        Catalog::from_songs(
            (0..len)
                .map(|i| Song::new(format!("id{i}"), format!("Song {i}"), Some("Artist")))
                .collect(),
        )
    }

    fn controller() -> PlaybackController<FakeMedia> {
        let mut controller = PlaybackController::new(
            FakeMedia::default(),
            Url::parse("http://localhost:8080").unwrap(),
            1.0,
        );
        controller.media.calls.clear();
        controller
    }

    #[test]
    fn play_selects_and_starts() {
        let catalog = catalog(3);
        for i in 0..3 {
            let mut c = controller();
            assert_eq!(c.play(&catalog, i), Transition::Changed);
            assert_eq!(
                c.state(),
                PlaybackState {
                    current_index: Some(i),
                    is_playing: true
                }
            );
            assert_eq!(
                c.media.calls,
                vec![
                    MediaCall::Load(format!("http://localhost:8080/api/stream?id=id{i}")),
                    MediaCall::Play
                ]
            );
        }
    }

    #[test]
    fn play_out_of_range_changes_nothing() {
        let catalog = catalog(2);
        let mut c = controller();
        let _ = c.play(&catalog, 1);
        let before = c.state();
        let calls = c.media.calls.len();

        assert_eq!(c.play(&catalog, 2), Transition::Ignored);
        assert_eq!(c.play(&catalog, usize::MAX), Transition::Ignored);
        assert_eq!(c.state(), before);
        assert_eq!(c.media.calls.len(), calls);
    }

    #[test]
    fn toggle_without_selection_plays_first() {
        let catalog = catalog(2);
        let mut c = controller();
        assert_eq!(c.toggle_play(&catalog), Transition::Changed);
        assert_eq!(c.current_index(), Some(0));
        assert!(c.is_playing());
    }

    #[test]
    fn toggle_with_empty_catalog_is_ignored() {
        let mut c = controller();
        assert_eq!(c.toggle_play(&Catalog::new()), Transition::Ignored);
        assert_eq!(c.state(), PlaybackState::default());
        assert!(c.media.calls.is_empty());
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let catalog = catalog(2);
        let mut c = controller();
        let _ = c.play(&catalog, 1);
        c.media.calls.clear();

        let _ = c.toggle_play(&catalog);
        assert!(!c.is_playing());
        let _ = c.toggle_play(&catalog);
        assert!(c.is_playing());
        assert_eq!(c.media.calls, vec![MediaCall::Pause, MediaCall::Play]);
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn next_and_prev_stop_at_the_ends() {
        let catalog = catalog(3);
        let mut c = controller();

        assert_eq!(c.next(&catalog), Transition::Ignored);
        assert_eq!(c.prev(&catalog), Transition::Ignored);

        let _ = c.play(&catalog, 0);
        assert_eq!(c.prev(&catalog), Transition::Ignored);
        assert_eq!(c.current_index(), Some(0));

        assert_eq!(c.next(&catalog), Transition::Changed);
        assert_eq!(c.next(&catalog), Transition::Changed);
        assert_eq!(c.current_index(), Some(2));
        assert_eq!(c.next(&catalog), Transition::Ignored);
        assert_eq!(c.current_index(), Some(2));

        assert_eq!(c.prev(&catalog), Transition::Changed);
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn ended_advances_then_stops_at_last() {
        let catalog = catalog(2);
        let mut c = controller();
        let _ = c.play(&catalog, 0);

        assert_eq!(c.on_ended(&catalog), Transition::Changed);
        assert_eq!(c.current_index(), Some(1));
        assert!(c.is_playing());

        assert_eq!(c.on_ended(&catalog), Transition::Changed);
        assert_eq!(c.current_index(), Some(1));
        assert!(!c.is_playing());

        assert_eq!(c.on_ended(&catalog), Transition::Ignored);
    }

    #[test]
    fn resume_after_last_song_ended_reloads_it() {
        let catalog = catalog(2);
        let mut c = controller();
        let _ = c.play(&catalog, 1);
        let _ = c.on_ended(&catalog);
        c.media.calls.clear();

        assert_eq!(c.toggle_play(&catalog), Transition::Changed);
        assert_eq!(
            c.media.calls,
            vec![
                MediaCall::Load("http://localhost:8080/api/stream?id=id1".to_string()),
                MediaCall::Play
            ]
        );
        assert_eq!(c.current_index(), Some(1));
        assert!(c.is_playing());

        c.media.calls.clear();
        let _ = c.toggle_play(&catalog);
        assert_eq!(c.media.calls, vec![MediaCall::Pause]);
    }

    #[test]
    fn seek_uses_fraction_of_duration() {
        let catalog = catalog(1);
        let mut c = controller();
        let _ = c.play(&catalog, 0);
        c.media.duration = Some(Duration::from_secs(200));

        assert_eq!(c.seek(0.25), Transition::Changed);
        assert_eq!(c.media.position, Duration::from_secs(50));
        let _ = c.seek(7.0);
        assert_eq!(c.media.position, Duration::from_secs(200));
    }

    #[test]
    fn seek_without_duration_is_ignored() {
        let catalog = catalog(1);
        let mut c = controller();
        let _ = c.play(&catalog, 0);

        assert_eq!(c.seek(0.5), Transition::Ignored);
        assert_eq!(c.seek_forwards(Duration::from_secs(5)), Transition::Ignored);
        assert!(!c.media.calls.iter().any(|call| matches!(call, MediaCall::Seek(_))));
    }

    #[test]
    fn relative_seek_clamps_to_track() {
        let catalog = catalog(1);
        let mut c = controller();
        let _ = c.play(&catalog, 0);
        c.media.duration = Some(Duration::from_secs(10));
        c.media.position = Duration::from_secs(8);

        let _ = c.seek_forwards(Duration::from_secs(5));
        assert_eq!(c.media.position, Duration::from_secs(10));
        let _ = c.seek_backwards(Duration::from_secs(30));
        assert_eq!(c.media.position, Duration::ZERO);
    }

    #[test]
    fn volume_is_clamped() {
        let mut c = controller();
        let _ = c.set_volume(0.3);
        let _ = c.set_volume(1.7);
        let _ = c.set_volume(-1.0);
        assert_eq!(
            c.media.calls,
            vec![
                MediaCall::Volume(0.3),
                MediaCall::Volume(1.0),
                MediaCall::Volume(0.0)
            ]
        );
        assert_eq!(c.set_volume(f32::NAN), Transition::Ignored);
        assert_eq!(c.volume(), 0.0);
    }

    #[test]
    fn time_update_formats_progress() {
        let mut c = controller();
        assert!(c.on_time_update().is_none());

        c.media.duration = Some(Duration::from_secs(125));
        c.media.position = Duration::from_secs(59);
        let display = c.on_time_update().unwrap();
        assert_eq!(display.elapsed, "0:59");
        assert_eq!(display.duration, "2:05");
    }

    #[test]
    fn shrinking_catalog_drops_stale_selection() {
        let mut c = controller();
        let _ = c.play(&catalog(5), 4);

        assert_eq!(c.sync_catalog(&catalog(5)), Transition::Ignored);
        assert_eq!(c.sync_catalog(&catalog(2)), Transition::Changed);
        assert_eq!(c.state(), PlaybackState::default());
    }
}
