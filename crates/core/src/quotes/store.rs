//! Quote storage traits.
//!
//! This module defines the storage interface for quote data, allowing
//! different backends to be used interchangeably.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Quote;
use crate::errors::Result;

/// Storage interface for quote data.
///
/// - Writes are async since implementations may route them through a writer task
/// - Range reads are sync and expected to be fast
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Saves a quote, replacing any quote stored under the same
    /// [`Quote::storage_key`].
    async fn put(&self, quote: &Quote) -> Result<()>;

    /// Returns all quotes with `start <= timestamp <= end`, ordered by timestamp.
    fn scan_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Quote>>;

    /// Cheap round trip to the backend, used for readiness checks.
    fn ping(&self) -> Result<()>;
}
