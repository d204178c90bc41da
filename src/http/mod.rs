//! HTTP API mirroring the page surface
//!
//! This module provides the control surface for the transcription workflow:
//! - GET  /languages - Selector options (system audio + language registry)
//! - POST /record/start, /record/stop - Live capture toggle
//! - GET  /record/status - Recording indicator
//! - POST /transcribe/upload - Transcribe an uploaded media file
//! - POST /transcribe/link - Fetch a remote link via the relay and transcribe
//! - GET  /transcript, POST /transcript/clear, GET /transcript/export
//! - GET  /health - Health check

pub mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
