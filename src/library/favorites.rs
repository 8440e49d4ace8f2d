use std::{
    collections::{BTreeMap, HashSet},
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::Mutex,
};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub const FAVORITES_KEY: &str = "favorites";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable home of the favorite ids.
pub trait FavoritesRepository: Send + Sync {
    fn load(&self) -> Result<Vec<String>, StorageError>;
    fn save(&self, ids: &[String]) -> Result<(), StorageError>;
}

/// Key-value JSON file. Favorites live under [`FAVORITES_KEY`] as an array of
/// ids; other keys in the file are preserved on write.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl FavoritesRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = self.read_entries()?;
        match entries.remove(FAVORITES_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, ids: &[String]) -> Result<(), StorageError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "overwriting unreadable storage file");
                BTreeMap::new()
            }
        };
        entries.insert(FAVORITES_KEY.to_string(), serde_json::to_value(ids)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    ids: Mutex<Vec<String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl FavoritesRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.ids.lock().map(|ids| ids.clone()).unwrap_or_default())
    }

    fn save(&self, ids: &[String]) -> Result<(), StorageError> {
        if let Ok(mut guard) = self.ids.lock() {
            *guard = ids.to_vec();
        }
        Ok(())
    }
}

/// Favorite song ids. Every query goes to the repository; nothing is cached.
pub struct FavoritesStore {
    repo: Box<dyn FavoritesRepository>,
}

impl FavoritesStore {
    pub fn new(repo: impl FavoritesRepository + 'static) -> Self {
        Self {
            repo: Box::new(repo),
        }
    }

    fn read(&self) -> Vec<String> {
        self.repo.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read favorites, treating as empty");
            Vec::new()
        })
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.read().iter().any(|fav| fav == id)
    }

    pub fn ids(&self) -> HashSet<String> {
        self.read().into_iter().collect()
    }

    /// Flips membership of `id` and writes the whole set back. Returns the
    /// new liked state.
    pub fn toggle(&self, id: &str) -> Result<bool, StorageError> {
        let mut favorites = self.read();
        let liked = if favorites.iter().any(|fav| fav == id) {
            favorites.retain(|fav| fav != id);
            false
        } else {
            favorites.push(id.to_string());
            true
        };

        self.repo.save(&favorites)?;
        Ok(liked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "songdeck-favorites-{}-{name}.json",
            std::process::id()
        ))
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let store = FavoritesStore::new(MemoryRepository::with_ids(["a"]));

        assert!(!store.is_liked("b"));
        assert!(store.toggle("b").unwrap());
        assert!(store.is_liked("b"));
        assert!(!store.toggle("b").unwrap());
        assert!(!store.is_liked("b"));
        assert!(store.is_liked("a"));
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let repo = MemoryRepository::new();
        let store = FavoritesStore::new(repo);
        store.toggle("x").unwrap();
        store.toggle("y").unwrap();
        store.toggle("z").unwrap();
        store.toggle("y").unwrap();

        assert_eq!(store.read(), vec!["x".to_string(), "z".to_string()]);
    }

    #[test]
    fn file_repository_round_trips_and_keeps_other_keys() {
        let path = temp_path("roundtrip");
        fs::write(&path, r#"{"volume": 0.4}"#).unwrap();

        let repo = JsonFileRepository::new(&path);
        repo.save(&["1".to_string(), "2".to_string()]).unwrap();
        assert_eq!(repo.load().unwrap(), vec!["1", "2"]);

        let raw: BTreeMap<String, Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["volume"], serde_json::json!(0.4));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_empty() {
        let repo = JsonFileRepository::new(temp_path("missing"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_no_favorites() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();

        let store = FavoritesStore::new(JsonFileRepository::new(&path));
        assert!(!store.is_liked("1"));
        assert!(store.toggle("1").unwrap());
        assert!(store.is_liked("1"));

        fs::remove_file(&path).ok();
    }
}
