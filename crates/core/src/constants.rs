use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency every quote is priced from
pub const ORIGIN_CURRENCY: &str = "BRL";

/// Currency every quote is priced in
pub const DESTINATION_CURRENCY: &str = "USD";

/// Rate served when no real quote can be obtained
pub const FALLBACK_RATE: Decimal = dec!(5.00);

/// Format accepted by the history endpoint, e.g. "2025-04-18T18:30"
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";
