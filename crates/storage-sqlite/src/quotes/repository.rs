use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::QuoteDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::quotes::dsl as quotes_dsl;
use cambio_core::quotes::{format_storage_timestamp, Quote, QuoteStore};
use cambio_core::Result;

/// SQLite-backed [`QuoteStore`]. Reads go through the pool, writes through
/// the single writer task.
pub struct QuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl QuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl QuoteStore for QuoteRepository {
    async fn put(&self, quote: &Quote) -> Result<()> {
        let db_row = QuoteDB::from(quote);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(quotes_dsl::quotes)
                    .values(&db_row)
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                Ok(())
            })
            .await
    }

    fn scan_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        let start_str = format_storage_timestamp(&start);
        let end_str = format_storage_timestamp(&end);

        let rows = quotes_dsl::quotes
            .filter(quotes_dsl::timestamp.ge(&start_str))
            .filter(quotes_dsl::timestamp.le(&end_str))
            .order(quotes_dsl::timestamp.asc())
            .select(QuoteDB::as_select())
            .load::<QuoteDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| Quote::try_from(row).map_err(Into::into))
            .collect()
    }

    fn ping(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        conn.batch_execute("SELECT 1").into_core()
    }
}
