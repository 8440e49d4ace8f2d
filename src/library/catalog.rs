use thiserror::Error;
use tracing::{error, info};

use crate::{http::SongSource, library::song::Song};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Error loading songs: {0}")]
    Load(String),

    #[error("Song index {index} out of range (catalog has {len})")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    status: LoadStatus,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self {
            songs,
            status: LoadStatus::Loaded,
        }
    }

    pub async fn load<S>(&mut self, source: &S) -> Result<(), CatalogError>
    where
        S: SongSource + ?Sized,
    {
        let fetched = source.fetch_songs().await.map_err(|e| e.to_string());
        self.apply_fetch(fetched)
    }

    /// Installs the outcome of a song-list fetch. A failed fetch leaves the
    /// catalog empty.
    pub fn apply_fetch(&mut self, fetched: Result<Vec<Song>, String>) -> Result<(), CatalogError> {
        match fetched {
            Ok(songs) => {
                info!(count = songs.len(), "catalog loaded");
                self.songs = songs;
                self.status = LoadStatus::Loaded;
                Ok(())
            }
            Err(message) => {
                error!(error = %message, "failed to load catalog");
                self.songs.clear();
                self.status = LoadStatus::Failed(message.clone());
                Err(CatalogError::Load(message))
            }
        }
    }

    pub fn get(&self, index: usize) -> Result<&Song, CatalogError> {
        self.songs.get(index).ok_or(CatalogError::OutOfRange {
            index,
            len: self.songs.len(),
        })
    }

    pub fn index_of(&self, song: &Song) -> Option<usize> {
        self.songs.iter().position(|s| s.id == song.id)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiError;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    struct StaticSource(Vec<Song>);

    #[async_trait]
    impl SongSource for StaticSource {
        async fn fetch_songs(&self) -> Result<Vec<Song>, ApiError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SongSource for FailingSource {
        async fn fetch_songs(&self) -> Result<Vec<Song>, ApiError> {
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    fn songs() -> Vec<Song> {
        vec![
            Song::new("1", "One", Some("A")),
            Song::new("2", "Two", Some("B")),
        ]
    }

    #[tokio::test]
    async fn load_replaces_catalog() {
        let mut catalog = Catalog::from_songs(vec![Song::new("old", "Old", None)]);
        catalog.load(&StaticSource(songs())).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.status(), &LoadStatus::Loaded);
        assert_eq!(catalog.get(1).unwrap().id, "2");
    }

    #[tokio::test]
    async fn failed_load_leaves_catalog_empty() {
        let mut catalog = Catalog::from_songs(songs());
        let err = catalog.load(&FailingSource).await.unwrap_err();

        assert!(matches!(err, CatalogError::Load(_)));
        assert!(catalog.is_empty());
        assert!(matches!(catalog.status(), LoadStatus::Failed(_)));
    }

    #[test]
    fn get_out_of_range() {
        let catalog = Catalog::from_songs(songs());
        assert_eq!(
            catalog.get(2).unwrap_err(),
            CatalogError::OutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn index_of_matches_by_id() {
        let catalog = Catalog::from_songs(songs());
        let copy = Song::new("2", "Two", Some("B"));
        assert_eq!(catalog.index_of(&copy), Some(1));
        assert_eq!(catalog.index_of(&Song::new("9", "Nine", None)), None);
    }
}
