//! HTTP transport abstraction.
//!
//! Providers build a [`reqwest::Request`] and hand it to an [`HttpTransport`]
//! for execution. Production code uses [`ReqwestTransport`]; tests substitute
//! their own implementation to inject failures or canned bodies.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::MarketDataError;

pub use reqwest::Request;

/// Client timeout used by [`ReqwestTransport::default`]
pub const DEFAULT_TRANSPORT_TIMEOUT: Duration = Duration::from_secs(25);

/// Executes a prepared HTTP request and returns the raw response body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the full response body.
    ///
    /// `provider` is only used to label errors.
    async fn execute(&self, provider: &str, request: Request) -> Result<Vec<u8>, MarketDataError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// `timeout` bounds the whole exchange, connect through body.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::RequestBuild {
                provider: "transport".to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TRANSPORT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, provider: &str, request: Request) -> Result<Vec<u8>, MarketDataError> {
        let response =
            self.client
                .execute(request)
                .await
                .map_err(|e| MarketDataError::Transport {
                    provider: provider.to_string(),
                    message: e.to_string(),
                })?;

        // Non-2xx bodies are still handed back: the provider payload carries
        // its own success flag and the decoder decides what to do with it.
        debug!(provider, status = %response.status(), "Received provider response");

        let body = response
            .bytes()
            .await
            .map_err(|e| MarketDataError::Transport {
                provider: provider.to_string(),
                message: e.to_string(),
            })?;

        Ok(body.to_vec())
    }
}
