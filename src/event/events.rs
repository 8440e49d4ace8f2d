use crate::library::song::Song;

/// Messages posted to the UI loop from background tasks.
#[derive(Debug, Clone)]
pub enum Event {
    CatalogFetched(Result<Vec<Song>, String>),
    /// The media backend drained the source it loaded as `generation`.
    TrackEnded { generation: u64 },
}
