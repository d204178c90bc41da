use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use speechpad::{
    create_router, AppState, CaptureSession, Config, CpalBackendProvider, CpalEnumerator,
    LinkFetcher, TransferClient,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "speechpad", about = "Audio capture and transcription service")]
struct Args {
    /// Configuration file, without extension
    #[arg(long, default_value = "config/speechpad")]
    config: String,

    /// Override the HTTP port from the configuration file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Transcription endpoint: {}", cfg.transcription.endpoint);
    if cfg.transcription.api_key.is_empty() {
        warn!("transcription.api_key is empty; set SPEECHPAD__TRANSCRIPTION__API_KEY");
    }

    let session = CaptureSession::new(
        cfg.capture.backend_config(),
        Arc::new(CpalEnumerator),
        Arc::new(CpalBackendProvider),
    );
    let state = AppState::new(
        session,
        TransferClient::new(cfg.transcription.clone()),
        LinkFetcher::new(cfg.relay.clone()),
    );

    let addr = format!("{}:{}", cfg.service.http.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
