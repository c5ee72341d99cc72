//! Rate retrieval module - the latest-quote workflow with its fallback.

mod fallback;
mod rates_service;
mod rates_traits;


pub use fallback::mock_quote;
pub use rates_service::RateService;
pub use rates_traits::RateServiceTrait;
