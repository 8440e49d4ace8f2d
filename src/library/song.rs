use serde::{Deserialize, Serialize};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: Option<String>,
}

impl Song {
    pub fn new(id: impl Into<String>, name: impl Into<String>, artist: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.map(str::to_string),
        }
    }

    /// Artist as shown and grouped in the list. Blank artists count as unknown.
    pub fn display_artist(&self) -> &str {
        match self.artist.as_deref() {
            Some(artist) if !artist.trim().is_empty() => artist,
            _ => UNKNOWN_ARTIST,
        }
    }
}
