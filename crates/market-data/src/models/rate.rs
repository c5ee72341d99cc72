use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest rate for one currency pair as reported by a provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatestRate {
    /// Base currency the provider priced against (e.g. "BRL")
    pub base: String,

    /// Target currency code (e.g. "USD")
    pub symbol: String,

    /// Units of `symbol` per unit of `base`
    pub rate: Decimal,

    /// When the rate was received
    pub fetched_at: DateTime<Utc>,

    /// Provider that produced the rate
    pub source: String,
}

impl LatestRate {
    pub fn new(base: String, symbol: String, rate: Decimal, source: String) -> Self {
        Self {
            base,
            symbol,
            rate,
            fetched_at: Utc::now(),
            source,
        }
    }
}

/// True for rates below zero. A negative-signed zero is not negative.
pub fn is_negative_rate(rate: &Decimal) -> bool {
    rate.is_sign_negative() && !rate.is_zero()
}
