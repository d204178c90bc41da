use tokio::sync::mpsc;

use super::device::CaptureTarget;
use super::microphone::MicrophoneBackend;
use crate::error::CaptureError;

/// One encoded audio fragment, delivered in arrival order.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub data: Vec<u8>,
}

/// Configuration for capture backends.
#[derive(Debug, Clone)]
pub struct CaptureBackendConfig {
    /// Capture sample rate (the device must support it)
    pub sample_rate: u32,
    /// Channel count (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Duration of each delivered chunk in milliseconds (affects latency)
    pub chunk_duration_ms: u64,
}

impl Default for CaptureBackendConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000, // 16kHz for Whisper
            channels: 1,        // Mono
            chunk_duration_ms: 100,
        }
    }
}

/// Live audio capture backend.
///
/// Delivery contract: the first chunk is the container header, and after
/// `stop` resolves every buffered chunk has been sent and the channel is
/// closed. The header-first ordering lets the receiver concatenate chunks
/// verbatim into one playable asset.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Begin capturing audio.
    ///
    /// Returns a channel receiver that will receive encoded chunks.
    async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<AudioChunk>, CaptureError>;

    /// Stop capturing and release the underlying device.
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Check if the backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Creation seam for capture backends, so tests can script them.
pub trait BackendProvider: Send + Sync {
    fn create(
        &self,
        target: &CaptureTarget,
        config: &CaptureBackendConfig,
    ) -> Result<Box<dyn CaptureBackend>, CaptureError>;
}

/// Production provider: cpal-backed capture for every target.
pub struct CpalBackendProvider;

impl BackendProvider for CpalBackendProvider {
    fn create(
        &self,
        target: &CaptureTarget,
        config: &CaptureBackendConfig,
    ) -> Result<Box<dyn CaptureBackend>, CaptureError> {
        Ok(Box::new(MicrophoneBackend::new(
            target.clone(),
            config.clone(),
        )))
    }
}
