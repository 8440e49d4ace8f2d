use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::library::song::Song;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API url: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(StatusCode),
}

#[async_trait]
pub trait SongSource: Send + Sync {
    async fn fetch_songs(&self) -> Result<Vec<Song>, ApiError>;
}

#[derive(Clone)]
pub struct ApiService {
    pub client: Client,
    base_url: Url,
}

impl ApiService {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        let client = Client::builder().gzip(true).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn songs_url(&self) -> Url {
        self.endpoint("api/songs")
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(None);
        url
    }
}

/// Stream location for a song. Depends only on the base url and the id.
pub fn stream_url(base_url: &Url, song_id: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path("api/stream");
    url.set_query(None);
    url.query_pairs_mut().append_pair("id", song_id);
    url
}

#[async_trait]
impl SongSource for ApiService {
    async fn fetch_songs(&self) -> Result<Vec<Song>, ApiError> {
        let url = self.songs_url();
        debug!(%url, "fetching song list");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json::<Vec<Song>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_encodes_id() {
        let api = ApiService::new("http://localhost:8080").unwrap();
        let url = stream_url(api.base_url(), "abc 1&2");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/stream?id=abc+1%262"
        );
    }

    #[test]
    fn stream_url_is_deterministic() {
        let base = Url::parse("http://music.local:9000/").unwrap();
        assert_eq!(stream_url(&base, "x1"), stream_url(&base, "x1"));
        assert_ne!(stream_url(&base, "x1"), stream_url(&base, "x2"));
    }

    #[test]
    fn songs_url_replaces_base_path() {
        let api = ApiService::new("http://localhost:8080/ui/?q=1").unwrap();
        assert_eq!(api.songs_url().as_str(), "http://localhost:8080/api/songs");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiService::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
