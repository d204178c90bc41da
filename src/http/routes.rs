use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Selector options
        .route("/languages", get(handlers::list_languages))
        // Recording control
        .route("/record/status", get(handlers::record_status))
        .route("/record/start", post(handlers::start_recording))
        .route("/record/stop", post(handlers::stop_recording))
        // One-shot acquisitions
        .route("/transcribe/upload", post(handlers::upload_audio))
        .route("/transcribe/link", post(handlers::transcribe_link))
        // Transcript access
        .route("/transcript", get(handlers::get_transcript))
        .route("/transcript/clear", post(handlers::clear_transcript))
        .route("/transcript/export", get(handlers::export_transcript))
        // The surface is called from a browser page
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
