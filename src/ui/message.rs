use crate::library::filter::View;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Quit,

    // Transport
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    VolumeUp,
    VolumeDown,
    SeekForward,
    SeekBackward,
    SeekTo(f64),

    // List
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    PlaySelected,
    ToggleLikeSelected,

    // Navigation
    SetView(View),
    NextView,
    PreviousView,

    // Search
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    FinishSearch,
    ClearSearch,
}
