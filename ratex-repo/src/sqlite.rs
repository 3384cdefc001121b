//! SQLite rate cache adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tokio::sync::{Mutex, watch};

use ratex_types::{CurrencyRate, CurrencySymbol, RateStore, StoreError};

use crate::types::{DbRate, DbSymbol};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite-backed rate cache.
///
/// Each save runs as one database transaction; subscribers are notified only
/// after the commit succeeds. Saves are serialized through `write_lock` so the
/// published snapshot always matches the last commit.
pub struct SqliteStore {
    pool: SqlitePool,
    write_lock: Mutex<()>,
    rates: watch::Sender<Vec<CurrencyRate>>,
    symbols: watch::Sender<Vec<CurrencySymbol>>,
}

impl SqliteStore {
    /// Opens (or creates) the database and runs the schema migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let in_memory = database_url.contains(":memory:");

        // An in-memory database lives only as long as its connection.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(4)
                .connect_with(options)
                .await?
        };

        Ok(Self::with_pool(pool).await?)
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::raw_sql(include_str!("../migrations/0001_create_currency_tables.sql"))
            .execute(&pool)
            .await
            .map_err(db_err)?;

        let rates = load_rates(&pool).await?;
        let symbols = load_symbols(&pool).await?;
        tracing::debug!(
            rates = rates.len(),
            symbols = symbols.len(),
            "Opened SQLite rate cache"
        );

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
            rates: watch::Sender::new(rates),
            symbols: watch::Sender::new(symbols),
        })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

async fn load_rates(pool: &SqlitePool) -> Result<Vec<CurrencyRate>, StoreError> {
    let rows: Vec<DbRate> = sqlx::query_as(
        r#"SELECT currency_code, rate FROM currency_rates ORDER BY currency_code"#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    rows.into_iter().map(DbRate::into_domain).collect()
}

async fn load_symbols(pool: &SqlitePool) -> Result<Vec<CurrencySymbol>, StoreError> {
    let rows: Vec<DbSymbol> =
        sqlx::query_as(r#"SELECT code, name FROM currency_symbols ORDER BY code"#)
            .fetch_all(pool)
            .await
            .map_err(db_err)?;

    Ok(rows.into_iter().map(DbSymbol::into_domain).collect())
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateStore for SqliteStore {
    async fn exchange_rates(&self) -> Result<Vec<CurrencyRate>, StoreError> {
        load_rates(&self.pool).await
    }

    fn subscribe_exchange_rates(&self) -> watch::Receiver<Vec<CurrencyRate>> {
        self.rates.subscribe()
    }

    #[tracing::instrument(skip(self, rates), fields(count = rates.len()))]
    async fn save_exchange_rates(&self, rates: &[CurrencyRate]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut db_tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(r#"DELETE FROM currency_rates"#)
            .execute(&mut *db_tx)
            .await
            .map_err(db_err)?;

        for rate in rates {
            sqlx::query(r#"INSERT OR REPLACE INTO currency_rates (currency_code, rate) VALUES (?, ?)"#)
                .bind(&rate.currency_code)
                .bind(rate.rate)
                .execute(&mut *db_tx)
                .await
                .map_err(db_err)?;
        }

        db_tx.commit().await.map_err(db_err)?;

        let snapshot = load_rates(&self.pool).await?;
        self.rates.send_replace(snapshot);
        Ok(())
    }

    async fn currency_symbols(&self) -> Result<Vec<CurrencySymbol>, StoreError> {
        load_symbols(&self.pool).await
    }

    fn subscribe_currency_symbols(&self) -> watch::Receiver<Vec<CurrencySymbol>> {
        self.symbols.subscribe()
    }

    #[tracing::instrument(skip(self, symbols), fields(count = symbols.len()))]
    async fn save_currency_symbols(&self, symbols: &[CurrencySymbol]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut db_tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(r#"DELETE FROM currency_symbols"#)
            .execute(&mut *db_tx)
            .await
            .map_err(db_err)?;

        for symbol in symbols {
            sqlx::query(r#"INSERT OR REPLACE INTO currency_symbols (code, name) VALUES (?, ?)"#)
                .bind(&symbol.code)
                .bind(&symbol.display_name)
                .execute(&mut *db_tx)
                .await
                .map_err(db_err)?;
        }

        db_tx.commit().await.map_err(db_err)?;

        let snapshot = load_symbols(&self.pool).await?;
        self.symbols.send_replace(snapshot);
        Ok(())
    }
}
