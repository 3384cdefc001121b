//! # Ratex Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! conversion rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyRate, CurrencySymbol, Outcome)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Wire shapes returned by the remote rate provider
//! - `error/` - Provider, store, repository and conversion error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyRate, CurrencySymbol, Outcome, rate_for};
pub use dto::{ExchangeRatesResponse, SymbolsResponse};
pub use error::{ConversionError, FailureKind, ProviderError, RepositoryError, StoreError};
pub use ports::{ConnectivityOracle, RateProvider, RateStore};
