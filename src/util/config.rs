use std::{env, path::PathBuf};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use tracing::warn;

use crate::audio::config::AudioConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const STORAGE_FILE: &str = "storage.json";

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", *PROJECT_NAME))
            .ok()
            .map(PathBuf::from);
    pub static ref API_URL_ENV: String = format!("{}_API_URL", *PROJECT_NAME);
    pub static ref VOLUME_ENV: String = format!("{}_VOLUME", *PROJECT_NAME);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", *PROJECT_NAME);
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "songdeck", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = DATA_FOLDER.clone() {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub audio: AudioConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(get_data_dir(), |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(data_dir: PathBuf, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(&API_URL_ENV)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut audio = AudioConfig::default();
        if let Some(raw) = lookup(&VOLUME_ENV) {
            match raw.trim().parse::<u8>() {
                Ok(volume) => audio.volume = volume.min(100),
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid volume"),
            }
        }

        Self {
            api_url,
            data_dir,
            audio,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(PathBuf::from("/tmp/songdeck"), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.audio.volume, 100);
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/songdeck/storage.json"));
    }

    #[test]
    fn reads_api_url_and_volume() {
        let config = config(&[
            ("SONGDECK_API_URL", " http://music.lan:9000 "),
            ("SONGDECK_VOLUME", "140"),
        ]);
        assert_eq!(config.api_url, "http://music.lan:9000");
        assert_eq!(config.audio.volume, 100);
    }

    #[test]
    fn invalid_volume_keeps_default() {
        let config = config(&[("SONGDECK_VOLUME", "loud")]);
        assert_eq!(config.audio.volume, AudioConfig::default().volume);
    }
}
