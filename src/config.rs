use anyhow::Result;
use serde::Deserialize;

use crate::audio::backend::CaptureBackendConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub transcription: TranscriptionConfig,
    pub relay: RelayConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub chunk_duration_ms: u64,
}

impl CaptureConfig {
    pub fn backend_config(&self) -> CaptureBackendConfig {
        CaptureBackendConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            chunk_duration_ms: self.chunk_duration_ms,
        }
    }
}

impl Config {
    /// Load from the given file, then apply `SPEECHPAD__*` environment
    /// overrides. `SPEECHPAD__TRANSCRIPTION__API_KEY` keeps the bearer
    /// credential out of the file.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SPEECHPAD").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
