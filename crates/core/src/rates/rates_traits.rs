use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::quotes::Quote;

/// Trait defining the contract for rate service operations.
#[async_trait]
pub trait RateServiceTrait: Send + Sync {
    /// Latest BRL→USD quote. Never fails: any upstream problem yields the
    /// fallback quote.
    async fn fetch_latest_quote(&self) -> Quote;

    /// Stored quotes within `[start, end]`; empty when the store cannot be read.
    fn quote_history(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Quote>;

    /// Fails when the quote store cannot be reached.
    fn check_ready(&self) -> Result<()>;
}
