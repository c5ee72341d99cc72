use async_trait::async_trait;
use cambio_market_data::{FixerProvider, HttpTransport, RateProvider};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::fallback::mock_quote;
use super::rates_traits::RateServiceTrait;
use crate::constants::DESTINATION_CURRENCY;
use crate::errors::{Error, Result};
use crate::quotes::{Quote, QuoteStore};
use crate::secrets::SecretProvider;

/// Fetches the latest quote from Fixer and persists it.
pub struct RateService {
    secrets: Arc<dyn SecretProvider>,
    provider: FixerProvider,
    store: Arc<dyn QuoteStore>,
}

impl RateService {
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn QuoteStore>,
    ) -> Self {
        Self {
            secrets,
            provider: FixerProvider::new(transport),
            store,
        }
    }

    /// Points the provider at a different URL (staging, local stub).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.provider = self.provider.with_endpoint(endpoint);
        self
    }

    async fn fetch_provider_quote(&self) -> Result<Quote> {
        let api_key = self.secrets.get_api_key();
        let rate = self
            .provider
            .get_latest_rate(&api_key, DESTINATION_CURRENCY)
            .await?;
        Quote::new(rate.base, rate.rate, rate.fetched_at)
    }

    async fn persist(&self, quote: &Quote) {
        match self.store.put(quote).await {
            Ok(()) => info!("Saved {} quote {}", quote.origin, quote.storage_key()),
            Err(e) => error!("Failed to save quote {}: {}", quote.storage_key(), e),
        }
    }
}

fn failure_kind(err: &Error) -> &'static str {
    match err {
        Error::MarketData(inner) => inner.kind(),
        _ => "upstream-reports-failure",
    }
}

#[async_trait]
impl RateServiceTrait for RateService {
    async fn fetch_latest_quote(&self) -> Quote {
        match self.fetch_provider_quote().await {
            Ok(quote) => {
                self.persist(&quote).await;
                quote
            }
            Err(e) => {
                warn!(
                    "Serving fallback quote after {} from {}: {}",
                    failure_kind(&e),
                    self.provider.id(),
                    e
                );
                mock_quote()
            }
        }
    }

    fn quote_history(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Quote> {
        match self.store.scan_range(start, end) {
            Ok(quotes) => {
                debug!("Loaded {} quotes between {} and {}", quotes.len(), start, end);
                quotes
            }
            Err(e) => {
                error!("Failed to load quote history: {}", e);
                Vec::new()
            }
        }
    }

    fn check_ready(&self) -> Result<()> {
        self.store.ping().map_err(|e| {
            warn!("Quote store is not ready: {}", e);
            e
        })
    }
}
