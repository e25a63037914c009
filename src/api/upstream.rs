use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::AppError;

/// Thin wrapper over a shared reqwest client for the upstream feeds. Every
/// failure mode (connect error, non-success status, malformed payload) maps
/// to `AppError::UpstreamApi`. No retries happen at this layer.
#[derive(Debug, Clone, Default)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn get_text(&self, url: Url) -> Result<String, AppError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Parse a configured URL, surfacing bad configuration as an upstream
/// failure rather than a panic.
pub fn parse_url(raw: &str) -> Result<Url, AppError> {
    Url::parse(raw).map_err(|e| AppError::upstream(format!("invalid upstream URL {raw:?}: {e}")))
}
