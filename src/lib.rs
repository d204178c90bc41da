pub mod audio;
pub mod capture;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod languages;
pub mod transcript;
pub mod transfer;

pub use audio::{
    AudioAsset, AudioChunk, BackendProvider, CaptureBackend, CaptureBackendConfig, CaptureTarget,
    CpalBackendProvider, CpalEnumerator, DeviceEnumerator, DeviceInfo, DeviceKind,
};
pub use capture::{CaptureSession, CaptureStatus, FinishedCapture};
pub use config::Config;
pub use error::{CaptureError, FetchError, TransferError};
pub use fetch::LinkFetcher;
pub use http::{create_router, AppState};
pub use languages::{Language, LanguageSelection, LANGUAGES, SYSTEM_AUDIO};
pub use transcript::TranscriptSink;
pub use transfer::TransferClient;
