//! Cambio Market Data Crate
//!
//! This crate talks to the upstream foreign-exchange API on behalf of the
//! rate service. It knows how to build the outbound request, execute it through
//! a pluggable [`HttpTransport`], and decode the provider payload into a
//! [`LatestRate`].
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  RateProvider    |  (Fixer / apilayer)
//! +------------------+
//!          |  builds reqwest::Request
//!          v
//! +------------------+
//! |  HttpTransport   |  (reqwest client, or a test double)
//! +------------------+
//!          |  raw body bytes
//!          v
//! +------------------+
//! |   LatestRate     |  (base, symbol, rate)
//! +------------------+
//! ```
//!
//! Every failure is reported as a [`MarketDataError`]; callers decide what a
//! failure means for them.

pub mod errors;
pub mod models;
pub mod provider;
pub mod transport;

pub use errors::MarketDataError;
pub use models::{is_negative_rate, LatestRate};
pub use provider::fixer::{FixerProvider, DEFAULT_FIXER_URL};
pub use provider::RateProvider;
pub use transport::{HttpTransport, Request, ReqwestTransport, DEFAULT_TRANSPORT_TIMEOUT};
