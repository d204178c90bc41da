use super::state::AppState;
use crate::audio::asset::AudioAsset;
use crate::error::CaptureError;
use crate::languages::{LanguageSelection, LANGUAGES, SYSTEM_AUDIO};
use crate::transcript::{TranscriptFragment, EXPORT_FILENAME};
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartRecordingRequest {
    /// Selector value: a language code, or "system" for system audio
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct StartRecordingResponse {
    pub status: String,
    pub capture_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StopRecordingResponse {
    pub status: String,
    /// Transcribed text, present when a recording was finalized
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    /// Target audio URL, submitted as the `audio` form field
    pub audio: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub text: String,
    pub fragments: Vec<TranscriptFragment>,
    pub empty: bool,
}

#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn capture_error_response(e: &CaptureError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        CaptureError::AlreadyRecording => StatusCode::CONFLICT,
        CaptureError::PermissionDenied => StatusCode::FORBIDDEN,
        CaptureError::DeviceUnavailable => StatusCode::NOT_FOUND,
        CaptureError::Device(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /languages
/// Selector options: the system-audio entry followed by the registry
pub async fn list_languages() -> impl IntoResponse {
    let mut options = vec![LanguageOption {
        code: SYSTEM_AUDIO.to_string(),
        name: "System audio".to_string(),
    }];
    options.extend(LANGUAGES.iter().map(|lang| LanguageOption {
        code: lang.code.to_string(),
        name: lang.name.to_string(),
    }));

    (StatusCode::OK, Json(options))
}

/// GET /record/status
/// Recording indicator state
pub async fn record_status(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    (StatusCode::OK, Json(session.status().await))
}

/// POST /record/start
/// Start a live capture for the selected language (or system audio)
pub async fn start_recording(
    State(state): State<AppState>,
    Json(req): Json<StartRecordingRequest>,
) -> impl IntoResponse {
    let selection = LanguageSelection::parse(&req.language);

    let mut session = state.session.lock().await;
    if let Err(e) = session.start(selection).await {
        error!("Failed to start recording: {}", e);
        return capture_error_response(&e).into_response();
    }

    let status = session.status().await;
    (
        StatusCode::OK,
        Json(StartRecordingResponse {
            status: "recording".to_string(),
            capture_id: status.capture_id,
        }),
    )
        .into_response()
}

/// POST /record/stop
/// Stop the live capture and transcribe the finalized recording
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    // Finalize under the session lock, then transcribe without it so a slow
    // remote call cannot block the next recording.
    let finished = {
        let mut session = state.session.lock().await;
        match session.stop().await {
            Ok(finished) => finished,
            Err(e) => {
                error!("Failed to stop recording: {}", e);
                return capture_error_response(&e).into_response();
            }
        }
    };

    let Some(finished) = finished else {
        return (
            StatusCode::OK,
            Json(StopRecordingResponse {
                status: "idle".to_string(),
                text: None,
            }),
        )
            .into_response();
    };

    match state
        .transfer
        .transcribe(finished.asset, finished.language_hint.as_deref())
        .await
    {
        Ok(text) => {
            state.sink.write().await.append(&text);
            (
                StatusCode::OK,
                Json(StopRecordingResponse {
                    status: "stopped".to_string(),
                    text: Some(text),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Transcription failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /transcribe/upload
/// Transcribe an uploaded media file
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut asset = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        match field.bytes().await {
            Ok(bytes) => {
                asset = Some(AudioAsset::new(bytes.to_vec(), mime_type, name));
                break;
            }
            Err(e) => {
                error!("Failed to read uploaded file: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Could not read uploaded file".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    }

    let Some(asset) = asset else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing file field".to_string(),
            }),
        )
            .into_response();
    };

    info!("Uploaded {} ({} bytes)", asset.name, asset.len());

    match state.transfer.transcribe(asset, None).await {
        Ok(text) => {
            state.sink.write().await.append(&text);
            (StatusCode::OK, Json(TranscribeResponse { text })).into_response()
        }
        Err(e) => {
            error!("Transcription failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /transcribe/link
/// Fetch a remote audio link through the relay and transcribe it.
///
/// Failures on this path are logged and answered with an empty 204; the
/// transcript is left untouched.
pub async fn transcribe_link(
    State(state): State<AppState>,
    Form(req): Form<LinkRequest>,
) -> impl IntoResponse {
    let asset = match state.fetcher.fetch(&req.audio).await {
        Ok(asset) => asset,
        Err(e) => {
            error!("Error fetching audio link {}: {}", req.audio, e);
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    match state.transfer.transcribe(asset, None).await {
        Ok(text) => {
            state.sink.write().await.append(&text);
            (StatusCode::OK, Json(TranscribeResponse { text })).into_response()
        }
        Err(e) => {
            error!("Error transcribing audio link {}: {}", req.audio, e);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// GET /transcript
/// Accumulated transcript so far
pub async fn get_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let sink = state.sink.read().await;
    (
        StatusCode::OK,
        Json(TranscriptResponse {
            text: sink.render(),
            fragments: sink.fragments().to_vec(),
            empty: sink.is_empty(),
        }),
    )
}

/// POST /transcript/clear
/// Empty the transcript and disable export until new content arrives
pub async fn clear_transcript(State(state): State<AppState>) -> impl IntoResponse {
    state.sink.write().await.clear();
    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "cleared".to_string(),
        }),
    )
}

/// GET /transcript/export
/// Download the rendered transcript as a plain-text file
pub async fn export_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let sink = state.sink.read().await;
    if !sink.can_export() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Transcript is empty".to_string(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        sink.render(),
    )
        .into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
