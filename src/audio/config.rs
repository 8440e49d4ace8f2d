#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub volume: u8,
    pub volume_step: u8,
    pub seek_step_secs: u64,
    pub monitor_interval_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            volume_step: 5,
            seek_step_secs: 5,
            monitor_interval_ms: 100,
        }
    }
}
