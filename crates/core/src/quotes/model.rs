use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cambio_market_data::is_negative_rate;

use crate::constants::{DESTINATION_CURRENCY, FALLBACK_RATE, ORIGIN_CURRENCY};
use crate::errors::{Error, Result};

/// A currency-pair exchange rate observation.
///
/// Quotes are immutable once built: either decoded from the provider or
/// produced by [`Quote::fallback`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quote {
    pub origin: String,
    pub destination: String,
    pub value: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Builds a quote priced in USD, rejecting negative values.
    pub fn new(origin: impl Into<String>, value: Decimal, timestamp: DateTime<Utc>) -> Result<Self> {
        if is_negative_rate(&value) {
            return Err(Error::InvalidExchangeRate(format!(
                "rate must be non-negative, got {}",
                value
            )));
        }

        Ok(Self {
            origin: origin.into(),
            destination: DESTINATION_CURRENCY.to_string(),
            value,
            timestamp,
        })
    }

    /// The placeholder quote served when real data is unavailable.
    pub fn fallback(timestamp: DateTime<Utc>) -> Self {
        Self {
            origin: ORIGIN_CURRENCY.to_string(),
            destination: DESTINATION_CURRENCY.to_string(),
            value: FALLBACK_RATE,
            timestamp,
        }
    }

    /// Key the quote is upserted under: "BRLUSD_2025-04-18T18:30:00.000000Z".
    pub fn storage_key(&self) -> String {
        format!(
            "{}{}_{}",
            self.origin,
            self.destination,
            format_storage_timestamp(&self.timestamp)
        )
    }
}

/// Fixed-width UTC text so that lexical order matches chronological order.
pub fn format_storage_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
