use std::{
    io::Cursor,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use flume::Sender;
use reqwest::{Client, header::CONTENT_TYPE};
use rodio::{Decoder, Source};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
    audio::{
        error::AudioError, playback::PlaybackEngine, progress::TrackProgress,
        traits::MediaElement,
    },
    event::events::Event,
};

type StreamDecoder = Decoder<Cursor<Vec<u8>>>;

/// [`MediaElement`] backed by a rodio sink. A load downloads the whole stream
/// on a background task, decodes it and queues it; the caller never waits.
pub struct RodioMedia {
    engine: Arc<PlaybackEngine>,
    client: Client,
    progress: Arc<TrackProgress>,
    /// Held while the sink is swapped or inspected, so a generation check and
    /// the sink operation that depends on it happen together.
    sink_lock: Arc<Mutex<()>>,
    download_task: Option<JoinHandle<()>>,
}

fn lock(mutex: &Mutex<()>) -> MutexGuard<'_, ()> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RodioMedia {
    pub fn new(
        engine: PlaybackEngine,
        client: Client,
        event_tx: Sender<Event>,
        monitor_interval: Duration,
    ) -> Self {
        let media = Self {
            engine: Arc::new(engine),
            client,
            progress: Arc::new(TrackProgress::new()),
            sink_lock: Arc::new(Mutex::new(())),
            download_task: None,
        };

        media.start_monitor(event_tx, monitor_interval);
        media
    }

    pub fn progress(&self) -> &Arc<TrackProgress> {
        &self.progress
    }

    fn start_monitor(&self, event_tx: Sender<Event>, interval: Duration) {
        let engine = self.engine.clone();
        let progress = self.progress.clone();
        let sink_lock = self.sink_lock.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let ended = {
                    let _guard = lock(&sink_lock);
                    let generation = progress.get_generation();
                    if !progress.is_loaded() || engine.is_paused() {
                        None
                    } else {
                        progress.set_current_position(engine.get_pos());
                        if engine.is_empty() {
                            progress.set_loaded(false);
                            Some(generation)
                        } else {
                            None
                        }
                    }
                };

                if let Some(generation) = ended
                    && event_tx.send(Event::TrackEnded { generation }).is_err()
                {
                    break;
                }
            }
        });
    }
}

/// Symphonia format hint for a `Content-Type` value.
pub fn codec_hint(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match mime.as_str() {
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/aac" | "audio/aacp" => Some("aac"),
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" => Some("m4a"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/ogg" | "audio/vorbis" => Some("ogg"),
        _ => None,
    }
}

struct Download {
    bytes: Vec<u8>,
    hint: Option<&'static str>,
}

async fn fetch_source(
    client: &Client,
    url: &str,
    progress: &TrackProgress,
    generation: u64,
) -> Result<Option<Download>, AudioError> {
    let mut response = client.get(url).send().await?.error_for_status()?;
    progress.set_total_bytes(response.content_length().unwrap_or(0));
    let hint = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(codec_hint);

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if !progress.is_current(generation) {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
        progress.set_buffered_bytes(bytes.len() as u64);
    }

    if bytes.is_empty() {
        return Err(AudioError::StreamError("empty response body".to_string()));
    }
    progress.set_total_bytes(bytes.len() as u64);

    Ok(Some(Download { bytes, hint }))
}

/// Builds a seekable decoder over a fully downloaded stream. The byte length
/// lets the decoder estimate a duration for streams without a length header.
pub fn decode(bytes: Vec<u8>, hint: Option<&str>) -> Result<StreamDecoder, AudioError> {
    let byte_len = bytes.len() as u64;
    let mut builder = Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(byte_len)
        .with_seekable(true)
        .with_coarse_seek(true);
    if let Some(hint) = hint {
        builder = builder.with_hint(hint);
    }

    builder
        .build()
        .map_err(|e| AudioError::DecodingError(e.to_string()))
}

async fn load_source(
    client: Client,
    url: String,
    engine: Arc<PlaybackEngine>,
    progress: Arc<TrackProgress>,
    sink_lock: Arc<Mutex<()>>,
    generation: u64,
) -> Result<(), AudioError> {
    let Some(download) = fetch_source(&client, &url, &progress, generation).await? else {
        debug!(%url, "stream superseded");
        return Ok(());
    };

    let source = tokio::task::spawn_blocking(move || decode(download.bytes, download.hint))
        .await
        .map_err(|e| AudioError::DecodingError(e.to_string()))??;

    let _guard = lock(&sink_lock);
    if !progress.is_current(generation) {
        debug!(%url, "stream superseded");
        return Ok(());
    }
    if let Some(duration) = source.total_duration() {
        progress.set_total_duration(duration);
    }
    engine.play_source(source);
    progress.set_loaded(true);
    debug!(%url, "stream queued");
    Ok(())
}

impl MediaElement for RodioMedia {
    fn load(&mut self, url: &str) {
        if let Some(task) = self.download_task.take() {
            task.abort();
        }
        let generation = {
            let _guard = lock(&self.sink_lock);
            self.engine.stop();
            self.progress.reset()
        };

        let client = self.client.clone();
        let engine = self.engine.clone();
        let progress = self.progress.clone();
        let sink_lock = self.sink_lock.clone();
        let url = url.to_string();

        self.download_task = Some(tokio::spawn(async move {
            let result = load_source(
                client,
                url.clone(),
                engine,
                progress,
                sink_lock,
                generation,
            )
            .await;
            if let Err(e) = result {
                warn!(%url, error = %e, "failed to load stream");
            }
        }));
    }

    fn play(&mut self) {
        self.engine.play();
    }

    fn pause(&mut self) {
        self.engine.pause();
    }

    fn duration(&self) -> Option<Duration> {
        self.progress.total_duration()
    }

    fn current_time(&self) -> Duration {
        self.progress.current_position()
    }

    fn set_current_time(&mut self, position: Duration) {
        match self.engine.try_seek(position) {
            Ok(()) => self.progress.set_current_position(position),
            Err(e) => warn!(error = %e, "seek failed"),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.engine.set_volume(volume);
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        if let Some(task) = self.download_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_maps_to_codec_hint() {
        assert_eq!(codec_hint("audio/mpeg"), Some("mp3"));
        assert_eq!(codec_hint("Audio/MPEG; charset=binary"), Some("mp3"));
        assert_eq!(codec_hint("audio/flac"), Some("flac"));
        assert_eq!(codec_hint("audio/x-m4a"), Some("m4a"));
        assert_eq!(codec_hint("application/octet-stream"), None);
        assert_eq!(codec_hint(""), None);
    }

    #[test]
    fn non_audio_bytes_fail_to_decode() {
        let result = decode(b"definitely not audio".to_vec(), Some("mp3"));
        assert!(matches!(result, Err(AudioError::DecodingError(_))));
    }
}
