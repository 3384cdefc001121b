//! # Ratex Repository
//!
//! Concrete rate cache implementations (adapters) for the currency converter.
//! This crate provides storage adapters that implement the `RateStore` port.

use async_trait::async_trait;
use tokio::sync::watch;

use ratex_types::{CurrencyRate, CurrencySymbol, RateStore, StoreError};

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// URL that selects the process-local store.
pub const MEMORY_URL: &str = "memory://";

/// Unified store wrapper selected by database URL.
pub enum Store {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build and initialize a store from a database URL.
///
/// This function:
/// 1. Picks the adapter from the URL scheme
/// 2. Connects and runs migrations (SQLite only)
/// 3. Returns a ready-to-use `Store`
///
/// # Examples
///
/// ```ignore
/// let store = build_store("sqlite://currency.db?mode=rwc").await?;
/// let scratch = build_store("memory://").await?;
/// ```
pub async fn build_store(database_url: &str) -> anyhow::Result<Store> {
    Store::new(database_url).await
}

impl Store {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        if database_url == MEMORY_URL {
            tracing::info!("Using in-memory rate cache");
            return Ok(Store::Memory(MemoryStore::new()));
        }

        #[cfg(feature = "sqlite")]
        {
            if database_url.starts_with("sqlite:") {
                return Ok(Store::Sqlite(SqliteStore::new(database_url).await?));
            }
        }

        anyhow::bail!("Unsupported database URL: {database_url}")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement RateStore for Store (delegation)
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! delegate {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Store::Memory($store) => $call,
            #[cfg(feature = "sqlite")]
            Store::Sqlite($store) => $call,
        }
    };
}

#[async_trait]
impl RateStore for Store {
    async fn exchange_rates(&self) -> Result<Vec<CurrencyRate>, StoreError> {
        delegate!(self, s => s.exchange_rates().await)
    }

    fn subscribe_exchange_rates(&self) -> watch::Receiver<Vec<CurrencyRate>> {
        delegate!(self, s => s.subscribe_exchange_rates())
    }

    async fn save_exchange_rates(&self, rates: &[CurrencyRate]) -> Result<(), StoreError> {
        delegate!(self, s => s.save_exchange_rates(rates).await)
    }

    async fn currency_symbols(&self) -> Result<Vec<CurrencySymbol>, StoreError> {
        delegate!(self, s => s.currency_symbols().await)
    }

    fn subscribe_currency_symbols(&self) -> watch::Receiver<Vec<CurrencySymbol>> {
        delegate!(self, s => s.subscribe_currency_symbols())
    }

    async fn save_currency_symbols(&self, symbols: &[CurrencySymbol]) -> Result<(), StoreError> {
        delegate!(self, s => s.save_currency_symbols(symbols).await)
    }
}
