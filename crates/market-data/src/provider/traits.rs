//! Rate provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::LatestRate;

/// Trait for foreign-exchange rate providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cambio_market_data::{LatestRate, MarketDataError, RateProvider};
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl RateProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn get_latest_rate(
///         &self,
///         _api_key: &str,
///         symbol: &str,
///     ) -> Result<LatestRate, MarketDataError> {
///         Ok(LatestRate::new("BRL".into(), symbol.into(), dec!(5), "STATIC".into()))
///     }
/// }
/// ```
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error labels.
    fn id(&self) -> &'static str;

    /// Fetch the latest rate of `symbol` against the provider's base currency.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Credential sent to the provider
    /// * `symbol` - Target currency code, e.g. "USD"
    async fn get_latest_rate(
        &self,
        api_key: &str,
        symbol: &str,
    ) -> Result<LatestRate, MarketDataError>;
}
