//! Quote management module.
//!
//! - [`model`] - The `Quote` domain model
//! - [`store`] - Storage trait for persisting and range-querying quotes
//!
//! ```text
//! RateService → QuoteStore (DB)
//! ```

pub mod model;
pub mod store;

pub use model::{format_storage_timestamp, Quote};
pub use store::QuoteStore;
