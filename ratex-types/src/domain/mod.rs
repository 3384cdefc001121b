//! Domain models for the currency converter.

pub mod outcome;
pub mod rate;

pub use outcome::Outcome;
pub use rate::{CurrencyRate, CurrencySymbol, rate_for};
