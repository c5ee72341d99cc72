use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use cambio_core::Quote;

/// Wire form of a quote. `value` is a JSON number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct QuoteResponse {
    #[schema(example = "BRL")]
    pub origin: String,
    #[schema(example = "USD")]
    pub destination: String,
    #[schema(value_type = f64, example = 5.0)]
    pub value: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            origin: q.origin,
            destination: q.destination,
            value: q.value,
            timestamp: q.timestamp,
        }
    }
}

/// Query string of `/rate/history`. Both bounds use `YYYY-MM-DDTHH:MM`, UTC.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    #[param(example = "2025-04-01T00:00")]
    pub start: Option<String>,
    #[param(example = "2025-04-30T23:59")]
    pub end: Option<String>,
}
