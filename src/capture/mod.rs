//! Capture session management
//!
//! This module provides the `CaptureSession` abstraction that manages:
//! - Capture target selection (microphone vs. system audio output)
//! - Live chunk buffering for one recording at a time
//! - Finalization of buffered chunks into a single audio asset
//! - Recording indicator state

mod session;

pub use session::{CaptureSession, CaptureStatus, FinishedCapture, RECORDING_MIME, RECORDING_NAME};
