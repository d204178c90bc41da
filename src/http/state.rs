use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::capture::CaptureSession;
use crate::fetch::LinkFetcher;
use crate::transcript::TranscriptSink;
use crate::transfer::TransferClient;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single capture session for this service instance
    pub session: Arc<Mutex<CaptureSession>>,
    /// Accumulated transcript fragments
    pub sink: Arc<RwLock<TranscriptSink>>,
    /// Outbound transcription client
    pub transfer: Arc<TransferClient>,
    /// Relay fetcher for remote audio links
    pub fetcher: Arc<LinkFetcher>,
}

impl AppState {
    pub fn new(session: CaptureSession, transfer: TransferClient, fetcher: LinkFetcher) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            sink: Arc::new(RwLock::new(TranscriptSink::new())),
            transfer: Arc::new(transfer),
            fetcher: Arc::new(fetcher),
        }
    }
}
