use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Playback position shared between the media backend, its monitor task and
/// the UI.
#[derive(Default, Debug)]
pub struct TrackProgress {
    current_position_millis: Arc<AtomicU64>,
    total_duration_millis: Arc<AtomicU64>,
    total_bytes: Arc<AtomicU64>,
    buffered_bytes: Arc<AtomicU64>,
    generation: Arc<AtomicU64>,
    loaded: Arc<AtomicBool>,
}

impl TrackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_bytes(&self, bytes: u64) {
        self.total_bytes.store(bytes, Ordering::Relaxed);
    }

    pub fn set_buffered_bytes(&self, bytes: u64) {
        self.buffered_bytes.store(bytes, Ordering::Relaxed);
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn current_position(&self) -> Duration {
        Duration::from_millis(self.current_position_millis.load(Ordering::Relaxed))
    }

    /// `None` until the decoder has reported a length.
    pub fn total_duration(&self) -> Option<Duration> {
        match self.total_duration_millis.load(Ordering::Relaxed) {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }

    pub fn get_buffered_ratio(&self) -> f64 {
        let total = self.total_bytes.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            let buffered = self.buffered_bytes.load(Ordering::Relaxed);
            (buffered as f64 / total as f64).min(1.0)
        }
    }

    pub fn get_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// False once a newer load has replaced the source tagged `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.get_generation() == generation
    }

    /// Clears everything and returns the new generation. Work tagged with an
    /// older generation must be discarded.
    pub fn reset(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_loaded(false);
        self.set_buffered_bytes(0);
        self.set_total_bytes(0);
        self.set_current_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
        generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeDisplay {
    pub elapsed: String,
    pub duration: String,
    pub remaining: String,
    pub percent: f64,
}

impl TimeDisplay {
    pub fn new(current: Duration, duration: Duration) -> Option<Self> {
        if duration.is_zero() {
            return None;
        }

        let current = current.min(duration);
        Some(Self {
            elapsed: format_time(current),
            duration: format_time(duration),
            remaining: format_time(duration - current),
            percent: current.as_secs_f64() / duration.as_secs_f64() * 100.0,
        })
    }

    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }
}

/// `m:ss`, seconds always two digits.
pub fn format_time(time: Duration) -> String {
    let total_seconds = time.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_retires_the_previous_generation() {
        let progress = TrackProgress::new();
        let first = progress.reset();
        progress.set_loaded(true);
        progress.set_total_duration(Duration::from_secs(90));
        assert!(progress.is_current(first));

        let second = progress.reset();
        assert_ne!(first, second);
        assert!(!progress.is_current(first));
        assert!(progress.is_current(second));
        assert!(!progress.is_loaded());
        assert_eq!(progress.total_duration(), None);
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(Duration::from_secs(125)), "2:05");
        assert_eq!(format_time(Duration::from_secs(59)), "0:59");
        assert_eq!(format_time(Duration::from_millis(61_999)), "1:01");
        assert_eq!(format_time(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn time_display_percent() {
        let display =
            TimeDisplay::new(Duration::from_secs(30), Duration::from_secs(120)).unwrap();
        assert_eq!(display.elapsed, "0:30");
        assert_eq!(display.duration, "2:00");
        assert_eq!(display.remaining, "1:30");
        assert!((display.percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_duration_has_no_display() {
        assert!(TimeDisplay::new(Duration::from_secs(3), Duration::ZERO).is_none());
    }

    #[test]
    fn reset_bumps_generation_and_clears() {
        let progress = TrackProgress::new();
        progress.set_total_duration(Duration::from_secs(10));
        progress.set_loaded(true);

        let generation = progress.reset();
        assert_eq!(generation, 1);
        assert_eq!(progress.get_generation(), 1);
        assert!(!progress.is_loaded());
        assert_eq!(progress.total_duration(), None);
    }
}
