//! Remote rate provider port.
//!
//! Implementations can be HTTP clients, mock providers, etc.

use crate::dto::{ExchangeRatesResponse, SymbolsResponse};
use crate::error::ProviderError;

/// Port trait for remote exchange rate sources.
///
/// One attempt per call; retries belong to the transport.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the latest rates relative to the provider's base currency.
    async fn fetch_exchange_rates(&self) -> Result<ExchangeRatesResponse, ProviderError>;

    /// Fetches the `code -> display name` table.
    async fn fetch_currency_symbols(&self) -> Result<SymbolsResponse, ProviderError>;
}
