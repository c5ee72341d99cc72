//! Market data models
//!
//! - `rate` - The decoded latest-rate observation (`LatestRate`)

mod rate;

pub use rate::{is_negative_rate, LatestRate};
