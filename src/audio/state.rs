/// Selection and play flag. `current_index` is always a valid catalog index
/// when set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: Option<usize>,
    pub is_playing: bool,
}

/// Result of a transport operation. `Ignored` means nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    Changed,
    Ignored,
}

impl Transition {
    pub fn is_changed(self) -> bool {
        matches!(self, Transition::Changed)
    }
}
