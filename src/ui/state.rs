use crate::{audio::progress::TimeDisplay, library::filter::ViewState};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: ViewState,
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub is_loading: bool,
    pub editing_search: bool,
    /// Position among the visible songs, header rows excluded.
    pub selected: usize,
    pub time_display: Option<TimeDisplay>,
    pub notice: Option<String>,
}
