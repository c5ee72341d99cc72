//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted to the
//! database-agnostic types defined in `cambio_core` at the crate boundary.

use diesel::result::Error as DieselError;
use thiserror::Error;
use cambio_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap Diesel and r2d2 types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Stored row is malformed: {0}")]
    MalformedRow(String),

    #[error("Writer unavailable: {0}")]
    WriterUnavailable(String),

    #[error("Core error: {0}")]
    CoreError(String),
}

// Lets write_actor jobs return core errors inside a diesel transaction.
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::MalformedRow(e)
            | StorageError::WriterUnavailable(e)
            | StorageError::CoreError(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}

/// Extension trait for converting Diesel and pool results to core results.
pub trait IntoCore<T> {
    fn into_core(self) -> cambio_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> cambio_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> cambio_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_query_failed() {
        let core: Error = StorageError::from(DieselError::NotFound).into();
        assert!(matches!(
            core,
            Error::Database(DatabaseError::QueryFailed(_))
        ));
    }

    #[test]
    fn test_malformed_row_maps_to_internal() {
        let core: Error = StorageError::MalformedRow("value: abc".to_string()).into();
        match core {
            Error::Database(DatabaseError::Internal(msg)) => assert_eq!(msg, "value: abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
