//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a rate from a provider.
///
/// Each variant maps to one stage of the fetch pipeline; see
/// [`kind`](Self::kind) for the stable label used in logs.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No API key was available for the provider.
    #[error("Missing API key for provider: {provider}")]
    MissingApiKey { provider: String },

    /// The outbound request could not be constructed (bad URL, bad header value).
    #[error("Failed to build request for {provider}: {message}")]
    RequestBuild { provider: String, message: String },

    /// The request could not be sent or the body could not be read.
    #[error("Transport error for {provider}: {message}")]
    Transport { provider: String, message: String },

    /// The response body was not the JSON document we expected.
    #[error("Failed to decode response from {provider}: {message}")]
    Decode { provider: String, message: String },

    /// The provider answered but flagged the request as unsuccessful.
    #[error("Provider reported failure: {provider} - {message}")]
    UpstreamFailure { provider: String, message: String },

    /// The requested symbol was absent from the provider's rates.
    #[error("Rate for {symbol} missing from {provider} response")]
    MissingRate { provider: String, symbol: String },

    /// The provider returned a rate we refuse to store.
    #[error("Invalid rate from {provider}: {message}")]
    InvalidRate { provider: String, message: String },
}

impl MarketDataError {
    /// Short, stable label for the failure stage.
    ///
    /// ```
    /// use cambio_market_data::MarketDataError;
    ///
    /// let error = MarketDataError::MissingApiKey { provider: "FIXER".to_string() };
    /// assert_eq!(error.kind(), "secret-unavailable");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "secret-unavailable",
            Self::RequestBuild { .. } => "request-build-failure",
            Self::Transport { .. } => "transport-failure",
            Self::Decode { .. } => "decode-failure",
            Self::UpstreamFailure { .. } | Self::MissingRate { .. } | Self::InvalidRate { .. } => {
                "upstream-reports-failure"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        let provider = "FIXER".to_string();
        let cases = [
            (
                MarketDataError::RequestBuild {
                    provider: provider.clone(),
                    message: "bad header".into(),
                },
                "request-build-failure",
            ),
            (
                MarketDataError::Transport {
                    provider: provider.clone(),
                    message: "connection refused".into(),
                },
                "transport-failure",
            ),
            (
                MarketDataError::Decode {
                    provider: provider.clone(),
                    message: "expected value".into(),
                },
                "decode-failure",
            ),
            (
                MarketDataError::MissingRate {
                    provider: provider.clone(),
                    symbol: "USD".into(),
                },
                "upstream-reports-failure",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.kind(), expected);
        }
    }

    #[test]
    fn test_display_includes_provider() {
        let error = MarketDataError::UpstreamFailure {
            provider: "FIXER".to_string(),
            message: "success=false".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Provider reported failure: FIXER - success=false"
        );
    }
}
