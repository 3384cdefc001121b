//! Cached currency records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange rate of one unit of the provider's base currency into `currency_code`.
///
/// The base currency is whatever the remote provider quoted against; it is not
/// stored alongside the rate. All rates in one cached set share the same base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency_code: String,
    pub rate: f64,
}

impl CurrencyRate {
    pub fn new(currency_code: impl Into<String>, rate: f64) -> Self {
        Self {
            currency_code: currency_code.into(),
            rate,
        }
    }
}

impl fmt::Display for CurrencyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency_code, self.rate)
    }
}

/// Human readable name for a currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySymbol {
    pub code: String,
    pub display_name: String,
}

impl CurrencySymbol {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.display_name)
    }
}

/// Looks up the rate for `code` by exact, case-sensitive match.
pub fn rate_for(rates: &[CurrencyRate], code: &str) -> Option<f64> {
    rates
        .iter()
        .find(|r| r.currency_code == code)
        .map(|r| r.rate)
}
