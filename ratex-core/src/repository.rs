//! Currency Repository
//!
//! Decides which rates and symbols the user sees: fresh data from the remote
//! provider when online, the local cache otherwise or when the fetch fails.
//! Holds no mutable state of its own.

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, info, warn};

use ratex_types::{
    ConnectivityOracle, ConversionError, CurrencyRate, CurrencySymbol, Outcome, ProviderError,
    RateProvider, RateStore, RepositoryError, StoreError, rate_for,
};

/// Coordinates the remote provider, the local cache and the connectivity check.
///
/// Generic over its three ports - adapters are injected through `new`.
pub struct CurrencyRepository<P, S, C>
where
    P: RateProvider,
    S: RateStore,
    C: ConnectivityOracle,
{
    provider: P,
    store: S,
    connectivity: C,
}

impl<P, S, C> CurrencyRepository<P, S, C>
where
    P: RateProvider,
    S: RateStore,
    C: ConnectivityOracle,
{
    pub fn new(provider: P, store: S, connectivity: C) -> Self {
        Self {
            provider,
            store,
            connectivity,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn connectivity(&self) -> &C {
        &self.connectivity
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Streamed reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Yields `Loading`, then exactly one `Success` or `Error`.
    ///
    /// Nothing runs until the stream is polled past `Loading`.
    pub fn exchange_rates(&self) -> impl Stream<Item = Outcome<Vec<CurrencyRate>>> + Send + '_ {
        stream::once(async { Outcome::Loading })
            .chain(stream::once(self.resolve_exchange_rates()))
    }

    /// Same policy as [`Self::exchange_rates`], for the symbol table.
    pub fn currency_symbols(
        &self,
    ) -> impl Stream<Item = Outcome<Vec<CurrencySymbol>>> + Send + '_ {
        stream::once(async { Outcome::Loading })
            .chain(stream::once(self.resolve_currency_symbols()))
    }

    #[tracing::instrument(skip(self))]
    async fn resolve_exchange_rates(&self) -> Outcome<Vec<CurrencyRate>> {
        if !self.connectivity.is_internet_available() {
            debug!("Offline, serving cached exchange rates");
            let cached = cache_or_empty(self.store.exchange_rates().await);
            return from_cache(cached, RepositoryError::NoConnectivity);
        }

        match self.provider.fetch_exchange_rates().await {
            Ok(response) => {
                let rates = response.into_rates();
                if let Err(e) = self.store.save_exchange_rates(&rates).await {
                    warn!(error = %e, "Failed to cache exchange rates");
                }
                info!(count = rates.len(), "Exchange rates refreshed");
                Outcome::Success(rates)
            }
            Err(err) => {
                let cached = cache_or_empty(self.store.exchange_rates().await);
                fallback(err, cached)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn resolve_currency_symbols(&self) -> Outcome<Vec<CurrencySymbol>> {
        if !self.connectivity.is_internet_available() {
            debug!("Offline, serving cached currency symbols");
            let cached = cache_or_empty(self.store.currency_symbols().await);
            return from_cache(cached, RepositoryError::NoConnectivity);
        }

        match self.provider.fetch_currency_symbols().await {
            Ok(response) => {
                let symbols = response.into_symbols();
                if let Err(e) = self.store.save_currency_symbols(&symbols).await {
                    warn!(error = %e, "Failed to cache currency symbols");
                }
                info!(count = symbols.len(), "Currency symbols refreshed");
                Outcome::Success(symbols)
            }
            Err(err) => {
                let cached = cache_or_empty(self.store.currency_symbols().await);
                fallback(err, cached)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` using the cached rate set only; never fetches.
    ///
    /// Computes `(amount / rate[from]) * rate[to]` in that order, without
    /// rounding and without special-casing `from == to`.
    #[tracing::instrument(skip(self))]
    pub async fn convert_currency(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<f64, ConversionError> {
        let rates = self.store.exchange_rates().await?;

        if rates.is_empty() {
            if !self.connectivity.is_internet_available() {
                return Err(ConversionError::NoConnectivity);
            }
            return Err(ConversionError::RatesUnavailable);
        }

        let from_rate =
            rate_for(&rates, from).ok_or_else(|| ConversionError::UnknownCurrency(from.into()))?;
        let to_rate =
            rate_for(&rates, to).ok_or_else(|| ConversionError::UnknownCurrency(to.into()))?;

        Ok((amount / from_rate) * to_rate)
    }
}

/// A failed cache read counts as an empty cache.
fn cache_or_empty<T>(read: Result<Vec<T>, StoreError>) -> Vec<T> {
    read.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to read cache");
        Vec::new()
    })
}

fn from_cache<T>(cached: Vec<T>, err: RepositoryError) -> Outcome<Vec<T>> {
    if cached.is_empty() {
        Outcome::Error(err.to_string())
    } else {
        Outcome::Success(cached)
    }
}

/// Cache presence always wins over reporting the remote failure.
fn fallback<T>(err: ProviderError, cached: Vec<T>) -> Outcome<Vec<T>> {
    if cached.is_empty() {
        warn!(error = %err, "Remote fetch failed and cache is empty");
    } else {
        warn!(error = %err, cached = cached.len(), "Remote fetch failed, serving cache");
    }
    from_cache(cached, RepositoryError::remote(&err))
}
