//! Rate provider abstractions and implementations.
//!
//! This module contains:
//! - The `RateProvider` trait that all providers implement
//! - The Fixer (apilayer) implementation

mod traits;

pub mod fixer;

pub use traits::RateProvider;
