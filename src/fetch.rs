//! Remote audio link acquisition through a CORS relay.

use reqwest::header;
use reqwest::Client;
use tracing::info;

use crate::audio::asset::AudioAsset;
use crate::config::RelayConfig;
use crate::error::FetchError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Fetches third-party audio URLs via the configured relay.
pub struct LinkFetcher {
    http: Client,
    relay_base: String,
}

impl LinkFetcher {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: Client::new(),
            relay_base: config.base_url,
        }
    }

    /// Fetch a remote audio resource and wrap it as an asset.
    ///
    /// The relay expects the target URL as a path suffix and the target URL
    /// as the `Origin` header value. The asset takes its name from the URL's
    /// final path segment and its type from the response's content type.
    pub async fn fetch(&self, url: &str) -> Result<AudioAsset, FetchError> {
        let relay_url = format!("{}/{}", self.relay_base.trim_end_matches('/'), url);

        let response = self
            .http
            .get(&relay_url)
            .header(header::ORIGIN, url)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let mime_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(FALLBACK_MIME)
            .to_string();
        let name = asset_name_from_url(url);
        let bytes = response.bytes().await?.to_vec();

        info!("Fetched {} ({} bytes, {})", name, bytes.len(), mime_type);

        Ok(AudioAsset::new(bytes, mime_type, name))
    }
}

/// Final path segment of the link, mirroring how a browser would name the
/// downloaded file.
pub fn asset_name_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_final_path_segment() {
        assert_eq!(
            asset_name_from_url("https://example.com/audio/sample.mp3"),
            "sample.mp3"
        );
    }

    #[test]
    fn test_name_without_path_is_whole_input() {
        assert_eq!(asset_name_from_url("sample.mp3"), "sample.mp3");
    }

    #[test]
    fn test_trailing_slash_yields_empty_name() {
        assert_eq!(asset_name_from_url("https://example.com/audio/"), "");
    }
}
