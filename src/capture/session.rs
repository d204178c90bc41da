use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::audio::asset::AudioAsset;
use crate::audio::backend::{
    AudioChunk, BackendProvider, CaptureBackend, CaptureBackendConfig,
};
use crate::audio::device::{select_capture_target, DeviceEnumerator};
use crate::error::CaptureError;
use crate::languages::LanguageSelection;

/// Container type for finalized recordings.
pub const RECORDING_MIME: &str = "audio/wav";
/// File name handed to the transfer client for finalized recordings.
pub const RECORDING_NAME: &str = "recording.wav";

/// Result of a completed capture cycle, ready for the transfer client.
#[derive(Debug)]
pub struct FinishedCapture {
    pub asset: AudioAsset,
    /// Language code selected at start; absent for system-audio captures.
    pub language_hint: Option<String>,
}

/// Recording indicator state.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureStatus {
    pub recording: bool,
    pub capture_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub chunks_buffered: usize,
}

struct ActiveRecording {
    capture_id: String,
    started_at: DateTime<Utc>,
    language_hint: Option<String>,
    backend: Box<dyn CaptureBackend>,
    chunks: Arc<Mutex<Vec<AudioChunk>>>,
    drain_task: JoinHandle<()>,
}

/// A capture session that manages one live recording at a time.
///
/// The session is the only owner of the chunk buffer: chunks arrive from the
/// backend in order, accumulate while recording, and are concatenated into
/// exactly one [`AudioAsset`] when the recording stops.
pub struct CaptureSession {
    config: CaptureBackendConfig,
    enumerator: Arc<dyn DeviceEnumerator>,
    provider: Arc<dyn BackendProvider>,
    active: Option<ActiveRecording>,
}

impl CaptureSession {
    pub fn new(
        config: CaptureBackendConfig,
        enumerator: Arc<dyn DeviceEnumerator>,
        provider: Arc<dyn BackendProvider>,
    ) -> Self {
        Self {
            config,
            enumerator,
            provider,
            active: None,
        }
    }

    /// Start recording for the given selector value.
    ///
    /// Rejects overlapping recordings; resolves the capture target before
    /// touching any hardware.
    pub async fn start(&mut self, selection: LanguageSelection) -> Result<(), CaptureError> {
        if self.active.is_some() {
            warn!("Recording already in progress");
            return Err(CaptureError::AlreadyRecording);
        }

        let target = select_capture_target(&selection, self.enumerator.as_ref())?;
        let mut backend = self.provider.create(&target, &self.config)?;
        let mut chunk_rx = backend.start().await?;

        let chunks: Arc<Mutex<Vec<AudioChunk>>> = Arc::new(Mutex::new(Vec::new()));
        let buffer = Arc::clone(&chunks);

        // Buffer chunks in arrival order until the backend closes the channel.
        let drain_task = tokio::spawn(async move {
            while let Some(chunk) = chunk_rx.recv().await {
                buffer.lock().await.push(chunk);
            }
        });

        let capture_id = format!("capture-{}", uuid::Uuid::new_v4());
        info!("Recording started: {} ({})", capture_id, backend.name());

        self.active = Some(ActiveRecording {
            capture_id,
            started_at: Utc::now(),
            language_hint: selection.language_hint().map(str::to_string),
            backend,
            chunks,
            drain_task,
        });

        Ok(())
    }

    /// Stop the current recording and finalize its audio asset.
    ///
    /// A stop while idle is a no-op returning `Ok(None)`. The underlying
    /// device is released unconditionally before the asset is assembled.
    pub async fn stop(&mut self) -> Result<Option<FinishedCapture>, CaptureError> {
        let Some(mut active) = self.active.take() else {
            warn!("Stop requested while idle; ignoring");
            return Ok(None);
        };

        // Hardware release comes first, whatever happens afterwards.
        let stop_result = active.backend.stop().await;

        // The backend closes the channel after its last chunk, so once the
        // drain task finishes the buffer is complete.
        if let Err(e) = (&mut active.drain_task).await {
            error!("Chunk drain task panicked: {e}");
        }

        stop_result?;

        let mut chunks = active.chunks.lock().await;
        let asset = AudioAsset::from_chunks(&chunks, RECORDING_MIME, RECORDING_NAME);
        chunks.clear();
        drop(chunks);

        info!(
            "Recording stopped: {} ({} bytes buffered)",
            active.capture_id,
            asset.len()
        );

        Ok(Some(FinishedCapture {
            asset,
            language_hint: active.language_hint,
        }))
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Snapshot of the recording indicator state.
    pub async fn status(&self) -> CaptureStatus {
        match &self.active {
            Some(active) => CaptureStatus {
                recording: true,
                capture_id: Some(active.capture_id.clone()),
                started_at: Some(active.started_at),
                chunks_buffered: active.chunks.lock().await.len(),
            },
            None => CaptureStatus {
                recording: false,
                capture_id: None,
                started_at: None,
                chunks_buffered: 0,
            },
        }
    }
}
