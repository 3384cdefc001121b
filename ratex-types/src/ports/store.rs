//! Local cache port.
//!
//! Adapters (SQLite, in-memory) implement this trait.

use tokio::sync::watch;

use crate::domain::{CurrencyRate, CurrencySymbol};
use crate::error::StoreError;

/// Durable cache of the last fetched rates and symbols, keyed by currency code.
///
/// Saves MUST replace the whole collection atomically: readers never observe
/// a mix of old and new records for the same collection.
#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Exchange rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Current snapshot of cached rates, ordered by currency code.
    async fn exchange_rates(&self) -> Result<Vec<CurrencyRate>, StoreError>;

    /// Receiver that always holds the latest committed rate set.
    fn subscribe_exchange_rates(&self) -> watch::Receiver<Vec<CurrencyRate>>;

    /// Replaces the full rate collection.
    async fn save_exchange_rates(&self, rates: &[CurrencyRate]) -> Result<(), StoreError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency symbols
    // ─────────────────────────────────────────────────────────────────────────────

    /// Current snapshot of cached symbols, ordered by currency code.
    async fn currency_symbols(&self) -> Result<Vec<CurrencySymbol>, StoreError>;

    fn subscribe_currency_symbols(&self) -> watch::Receiver<Vec<CurrencySymbol>>;

    /// Replaces the full symbol collection.
    async fn save_currency_symbols(&self, symbols: &[CurrencySymbol]) -> Result<(), StoreError>;
}
