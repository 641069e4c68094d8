//! Remote content source
//!
//! [`ContentSource`] is the seam the cache manager fetches through.
//! [`HttpContentSource`] is the production implementation: a plain HTTP GET
//! with no auth and no client-side timeout beyond what the transport applies.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::ContentPayload;
use crate::error::AdError;

/// Something that can produce the current content payload
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches and decodes the payload published at `api_url`
    ///
    /// # Errors
    /// * `AdError::Network` / `AdError::Http` if the request fails or the status is not 2xx
    /// * `AdError::Parse` if the body is not a valid payload
    async fn fetch(&self, api_url: &str) -> Result<ContentPayload, AdError>;
}

/// Fetches content over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: Client,
}

impl Default for HttpContentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpContentSource {
    /// Create a new source with a default HTTP client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new source with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, api_url: &str) -> Result<ContentPayload, AdError> {
        let response = self.client.get(api_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdError::Http(status.as_u16()));
        }

        let text = response.text().await?;
        let payload: ContentPayload = serde_json::from_str(&text)?;

        debug!(
            version = %payload.version,
            services = payload.services.len(),
            "Fetched content payload"
        );

        Ok(payload)
    }
}
