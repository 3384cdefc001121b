//! Wire shapes returned by the remote rate provider.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CurrencyRate, CurrencySymbol};

/// Response of the `latest` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRatesResponse {
    /// Currency every rate is quoted against
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub rates: BTreeMap<String, f64>,
}

impl ExchangeRatesResponse {
    /// Maps the `code -> rate` table into cache records.
    pub fn into_rates(self) -> Vec<CurrencyRate> {
        self.rates
            .into_iter()
            .map(|(code, rate)| CurrencyRate::new(code, rate))
            .collect()
    }
}

/// Response of the `symbols` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolsResponse {
    pub symbols: BTreeMap<String, String>,
}

impl SymbolsResponse {
    pub fn into_symbols(self) -> Vec<CurrencySymbol> {
        self.symbols
            .into_iter()
            .map(|(code, name)| CurrencySymbol::new(code, name))
            .collect()
    }
}

/// Error object inside a `"success": false` provider envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

impl ProviderErrorBody {
    /// Most descriptive text available.
    pub fn message(&self) -> String {
        self.info
            .clone()
            .or_else(|| self.kind.clone())
            .unwrap_or_else(|| format!("provider error {}", self.code))
    }
}
