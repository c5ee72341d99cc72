//! Database model for stored quotes.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use cambio_core::quotes::{format_storage_timestamp, Quote};

/// Row in the `quotes` table. Decimals and timestamps are kept as text; the
/// timestamp uses a fixed-width UTC layout so range filters compare lexically.
#[derive(Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub value: String,
    pub timestamp: String,
    pub created_at: String,
}

impl From<&Quote> for QuoteDB {
    fn from(quote: &Quote) -> Self {
        QuoteDB {
            id: quote.storage_key(),
            origin: quote.origin.clone(),
            destination: quote.destination.clone(),
            value: quote.value.to_string(),
            timestamp: format_storage_timestamp(&quote.timestamp),
            created_at: format_storage_timestamp(&Utc::now()),
        }
    }
}

impl TryFrom<QuoteDB> for Quote {
    type Error = StorageError;

    fn try_from(db: QuoteDB) -> Result<Self, Self::Error> {
        let value = Decimal::from_str(&db.value)
            .map_err(|e| StorageError::MalformedRow(format!("{}: value {}: {}", db.id, db.value, e)))?;
        let timestamp = DateTime::parse_from_rfc3339(&db.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                StorageError::MalformedRow(format!("{}: timestamp {}: {}", db.id, db.timestamp, e))
            })?;

        Ok(Quote {
            origin: db.origin,
            destination: db.destination,
            value,
            timestamp,
        })
    }
}
