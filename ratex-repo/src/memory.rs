//! In-memory rate cache adapter.

use async_trait::async_trait;
use tokio::sync::watch;

use ratex_types::{CurrencyRate, CurrencySymbol, RateStore, StoreError};

/// Process-local rate cache. Contents are lost when the store is dropped.
///
/// Each collection lives inside its watch channel and a save swaps it whole.
pub struct MemoryStore {
    rates: watch::Sender<Vec<CurrencyRate>>,
    symbols: watch::Sender<Vec<CurrencySymbol>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::seeded(Vec::new(), Vec::new())
    }

    /// Creates a store pre-populated with the given records.
    pub fn seeded(rates: Vec<CurrencyRate>, symbols: Vec<CurrencySymbol>) -> Self {
        Self {
            rates: watch::Sender::new(sorted_rates(rates)),
            symbols: watch::Sender::new(sorted_symbols(symbols)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_rates(mut rates: Vec<CurrencyRate>) -> Vec<CurrencyRate> {
    rates.sort_by(|a, b| a.currency_code.cmp(&b.currency_code));
    // Last record for a code wins, matching the SQLite replace semantics.
    rates.reverse();
    rates.dedup_by(|a, b| a.currency_code == b.currency_code);
    rates.reverse();
    rates
}

fn sorted_symbols(mut symbols: Vec<CurrencySymbol>) -> Vec<CurrencySymbol> {
    symbols.sort_by(|a, b| a.code.cmp(&b.code));
    symbols.reverse();
    symbols.dedup_by(|a, b| a.code == b.code);
    symbols.reverse();
    symbols
}

#[async_trait]
impl RateStore for MemoryStore {
    async fn exchange_rates(&self) -> Result<Vec<CurrencyRate>, StoreError> {
        Ok(self.rates.borrow().clone())
    }

    fn subscribe_exchange_rates(&self) -> watch::Receiver<Vec<CurrencyRate>> {
        self.rates.subscribe()
    }

    async fn save_exchange_rates(&self, rates: &[CurrencyRate]) -> Result<(), StoreError> {
        self.rates.send_replace(sorted_rates(rates.to_vec()));
        Ok(())
    }

    async fn currency_symbols(&self) -> Result<Vec<CurrencySymbol>, StoreError> {
        Ok(self.symbols.borrow().clone())
    }

    fn subscribe_currency_symbols(&self) -> watch::Receiver<Vec<CurrencySymbol>> {
        self.symbols.subscribe()
    }

    async fn save_currency_symbols(&self, symbols: &[CurrencySymbol]) -> Result<(), StoreError> {
        self.symbols.send_replace(sorted_symbols(symbols.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.exchange_rates().await.unwrap().is_empty());
        assert!(store.currency_symbols().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_whole_collection() {
        let store = MemoryStore::seeded(
            vec![CurrencyRate::new("USD", 1.1), CurrencyRate::new("GBP", 0.85)],
            vec![],
        );

        store
            .save_exchange_rates(&[CurrencyRate::new("PLN", 4.5)])
            .await
            .unwrap();

        assert_eq!(
            store.exchange_rates().await.unwrap(),
            vec![CurrencyRate::new("PLN", 4.5)]
        );
    }

    #[tokio::test]
    async fn test_snapshot_is_ordered_and_deduplicated() {
        let store = MemoryStore::new();
        store
            .save_exchange_rates(&[
                CurrencyRate::new("USD", 1.0),
                CurrencyRate::new("EUR", 1.0),
                CurrencyRate::new("USD", 1.2),
            ])
            .await
            .unwrap();

        assert_eq!(
            store.exchange_rates().await.unwrap(),
            vec![CurrencyRate::new("EUR", 1.0), CurrencyRate::new("USD", 1.2)]
        );
    }

    #[tokio::test]
    async fn test_subscriber_sees_latest_write() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe_currency_symbols();
        assert!(rx.borrow().is_empty());

        store
            .save_currency_symbols(&[CurrencySymbol::new("EUR", "Euro")])
            .await
            .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), vec![CurrencySymbol::new("EUR", "Euro")]);
    }
}
