//! Fixer (apilayer) provider for the latest BRL based exchange rates.
//!
//! The provider sends `GET /fixer/latest` with the API key in the `apikey`
//! header and expects a body of the form:
//!
//! ```json
//! { "success": true, "base": "BRL", "rates": { "USD": 0.18 } }
//! ```
//!
//! On failure Fixer answers with `success: false` and an `error` object, while
//! the apilayer gateway itself answers with a bare `message`.

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderValue;
use reqwest::{Method, Request, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::MarketDataError;
use crate::models::{is_negative_rate, LatestRate};
use crate::provider::RateProvider;
use crate::transport::HttpTransport;

/// Provider ID constant
const PROVIDER_ID: &str = "FIXER";

/// Header carrying the apilayer credential
const API_KEY_HEADER: &str = "apikey";

/// Latest BRL→USD rate endpoint.
pub const DEFAULT_FIXER_URL: &str = "https://api.apilayer.com/fixer/latest?base=BRL&symbols=USD";

/// API response from Fixer
#[derive(Debug, Deserialize)]
struct FixerLatestResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    base: String,
    #[serde(default)]
    rates: HashMap<String, Decimal>,
    #[serde(default)]
    error: Option<FixerErrorBody>,
    /// Set by the apilayer gateway (bad key, quota exceeded)
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixerErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    info: Option<String>,
}

impl FixerLatestResponse {
    fn failure_message(&self) -> String {
        if let Some(error) = &self.error {
            let detail = error
                .info
                .as_deref()
                .or(error.kind.as_deref())
                .unwrap_or("unknown error");
            return match error.code {
                Some(code) => format!("success=false ({code}: {detail})"),
                None => format!("success=false ({detail})"),
            };
        }
        match &self.message {
            Some(message) => format!("success=false ({message})"),
            None => "success=false".to_string(),
        }
    }
}

/// Fixer provider.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use cambio_market_data::{FixerProvider, ReqwestTransport};
///
/// let provider = FixerProvider::new(Arc::new(ReqwestTransport::default()));
/// let rate = provider.get_latest_rate("your_api_key", "USD").await?;
/// ```
pub struct FixerProvider {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl FixerProvider {
    /// Create a provider pointed at [`DEFAULT_FIXER_URL`].
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_FIXER_URL.to_string(),
        }
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the outbound GET request with the API key attached.
    pub fn build_request(&self, api_key: &str) -> Result<Request, MarketDataError> {
        let url = Url::parse(&self.endpoint).map_err(|e| MarketDataError::RequestBuild {
            provider: PROVIDER_ID.to_string(),
            message: format!("invalid endpoint '{}': {e}", self.endpoint),
        })?;

        let mut header = HeaderValue::from_str(api_key).map_err(|e| MarketDataError::RequestBuild {
            provider: PROVIDER_ID.to_string(),
            message: format!("invalid api key header: {e}"),
        })?;
        header.set_sensitive(true);

        let mut request = Request::new(Method::GET, url);
        request.headers_mut().insert(API_KEY_HEADER, header);
        Ok(request)
    }

    fn decode(body: &[u8]) -> Result<FixerLatestResponse, MarketDataError> {
        serde_json::from_slice(body).map_err(|e| MarketDataError::Decode {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for FixerProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_rate(
        &self,
        api_key: &str,
        symbol: &str,
    ) -> Result<LatestRate, MarketDataError> {
        if api_key.is_empty() {
            return Err(MarketDataError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let request = self.build_request(api_key)?;
        debug!("Requesting latest {} rate from {}", symbol, self.endpoint);

        let body = self.transport.execute(PROVIDER_ID, request).await?;
        let response = Self::decode(&body)?;

        if !response.success {
            return Err(MarketDataError::UpstreamFailure {
                provider: PROVIDER_ID.to_string(),
                message: response.failure_message(),
            });
        }

        let rate = response
            .rates
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::MissingRate {
                provider: PROVIDER_ID.to_string(),
                symbol: symbol.to_string(),
            })?;

        if is_negative_rate(&rate) {
            return Err(MarketDataError::InvalidRate {
                provider: PROVIDER_ID.to_string(),
                message: format!("negative rate {rate} for {symbol}"),
            });
        }

        Ok(LatestRate::new(
            response.base,
            symbol.to_string(),
            rate,
            PROVIDER_ID.to_string(),
        ))
    }
}
