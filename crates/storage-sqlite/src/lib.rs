//! SQLite storage implementation for the cambio rate service.
//!
//! This crate is the only place where Diesel dependencies exist. It provides
//! connection pooling, embedded migrations, the single-writer task and the
//! [`QuoteRepository`] implementing `cambio_core::quotes::QuoteStore`.
//!
//! ```text
//! core (RateService) ──▶ QuoteStore ──▶ storage-sqlite ──▶ SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod quotes;
pub mod schema;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::{IntoCore, StorageError};
pub use quotes::QuoteRepository;

pub use cambio_core::errors::{DatabaseError, Error, Result};
