use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised while acquiring or running a live capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("audio capture permission denied")]
    PermissionDenied,

    #[error("no system audio output device available")]
    DeviceUnavailable,

    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("audio device error: {0}")]
    Device(String),
}

/// Failures raised while fetching a remote audio link through the relay.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("relay fetch returned status {0}")]
    Status(StatusCode),

    #[error("relay fetch failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures raised by the single-shot transcription call.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("transcription endpoint returned status {0}")]
    Status(StatusCode),

    #[error("transcription request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transcription response carried no text field")]
    MalformedResponse,
}
