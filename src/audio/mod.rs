pub mod asset;
pub mod backend;
pub mod device;
pub mod microphone;

pub use asset::AudioAsset;
pub use backend::{
    AudioChunk, BackendProvider, CaptureBackend, CaptureBackendConfig, CpalBackendProvider,
};
pub use device::{
    select_capture_target, CaptureTarget, CpalEnumerator, DeviceEnumerator, DeviceInfo, DeviceKind,
};
pub use microphone::MicrophoneBackend;
