//! Single-shot client for the remote transcription endpoint.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::audio::asset::AudioAsset;
use crate::config::TranscriptionConfig;
use crate::error::TransferError;

/// Issues one transcription request per audio asset.
///
/// Every call is best-effort single-shot: no retry, no timeout beyond the
/// transport's own. Callers decide what a failure means for their path.
pub struct TransferClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
    default_language: String,
}

impl TransferClient {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint,
            model: config.model,
            api_key: config.api_key,
            default_language: config.default_language,
        }
    }

    /// Send one asset for transcription and return the recognized text.
    ///
    /// The multipart body carries the asset bytes as `file`, the configured
    /// `model`, and a `language` field; when no hint is given the configured
    /// default applies.
    pub async fn transcribe(
        &self,
        asset: AudioAsset,
        language: Option<&str>,
    ) -> Result<String, TransferError> {
        let language = self.effective_language(language).to_string();
        let byte_count = asset.len();

        let part = Part::bytes(asset.bytes)
            .file_name(asset.name)
            .mime_str(&asset.mime_type)?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", language.clone());

        info!(
            "Transcribing {} bytes (model={}, language={})",
            byte_count, self.model, language
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status(status));
        }

        let payload: Value = response.json().await?;
        let text = payload
            .get("text")
            .and_then(Value::as_str)
            .ok_or(TransferError::MalformedResponse)?
            .trim()
            .to_string();

        Ok(text)
    }

    fn effective_language<'a>(&'a self, hint: Option<&'a str>) -> &'a str {
        hint.unwrap_or(&self.default_language)
    }
}
