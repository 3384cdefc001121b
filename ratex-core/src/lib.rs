//! # Ratex Core
//!
//! Data-synchronization layer for the currency converter.
//!
//! ## Architecture
//!
//! - `repository` - `CurrencyRepository`, the cache/network decision point
//! - `view_model` - `ConversionViewModel`, the presentation-facing consumer
//!
//! The repository is generic over `RateProvider`, `RateStore` and
//! `ConnectivityOracle`, allowing different adapters to be injected.

pub mod repository;
pub mod view_model;


pub use repository::CurrencyRepository;
pub use view_model::{ConversionViewModel, UiState, parse_amount};
