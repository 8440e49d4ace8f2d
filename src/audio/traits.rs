use std::time::Duration;

/// The audio element the playback controller drives. Requests are fire and
/// forget: `load` and `play` return before audio is actually flowing.
pub trait MediaElement {
    fn load(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// `None` while the length of the current source is not known.
    fn duration(&self) -> Option<Duration>;
    fn current_time(&self) -> Duration;
    fn set_current_time(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
}
