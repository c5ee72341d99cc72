//! Cambio Core - Domain entities, services, and traits.
//!
//! This crate contains the quote retrieval workflow. It is storage-agnostic
//! and defines the traits implemented by the `storage-sqlite` crate and by
//! the server's secret store.

pub mod constants;
pub mod errors;
pub mod quotes;
pub mod rates;
pub mod secrets;

pub use quotes::Quote;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
