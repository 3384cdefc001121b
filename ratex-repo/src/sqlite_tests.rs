//! SQLite store integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use ratex_types::{CurrencyRate, CurrencySymbol, RateStore};

    use crate::SqliteStore;

    async fn setup_store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:").await.unwrap()
    }

    fn test_rates() -> Vec<CurrencyRate> {
        vec![
            CurrencyRate::new("USD", 1.1),
            CurrencyRate::new("EUR", 1.0),
            CurrencyRate::new("GBP", 0.85),
        ]
    }

    fn test_symbols() -> Vec<CurrencySymbol> {
        vec![
            CurrencySymbol::new("USD", "United States Dollar"),
            CurrencySymbol::new("EUR", "Euro"),
            CurrencySymbol::new("GBP", "British Pound Sterling"),
        ]
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = setup_store().await;

        assert!(store.exchange_rates().await.unwrap().is_empty());
        assert!(store.currency_symbols().await.unwrap().is_empty());
        assert!(store.subscribe_exchange_rates().borrow().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_read_rates() {
        let store = setup_store().await;

        store.save_exchange_rates(&test_rates()).await.unwrap();

        let rates = store.exchange_rates().await.unwrap();
        assert_eq!(
            rates,
            vec![
                CurrencyRate::new("EUR", 1.0),
                CurrencyRate::new("GBP", 0.85),
                CurrencyRate::new("USD", 1.1),
            ]
        );
    }

    #[tokio::test]
    async fn test_save_rates_replaces_previous_set() {
        let store = setup_store().await;
        store.save_exchange_rates(&test_rates()).await.unwrap();

        store
            .save_exchange_rates(&[CurrencyRate::new("PLN", 4.5)])
            .await
            .unwrap();

        let rates = store.exchange_rates().await.unwrap();
        assert_eq!(rates, vec![CurrencyRate::new("PLN", 4.5)]);
    }

    #[tokio::test]
    async fn test_save_empty_clears_rates() {
        let store = setup_store().await;
        store.save_exchange_rates(&test_rates()).await.unwrap();

        store.save_exchange_rates(&[]).await.unwrap();

        assert!(store.exchange_rates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rates_and_symbols_are_independent() {
        let store = setup_store().await;
        store.save_exchange_rates(&test_rates()).await.unwrap();
        store.save_currency_symbols(&test_symbols()).await.unwrap();

        store.save_currency_symbols(&[]).await.unwrap();

        assert_eq!(store.exchange_rates().await.unwrap().len(), 3);
        assert!(store.currency_symbols().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_read_symbols() {
        let store = setup_store().await;

        store.save_currency_symbols(&test_symbols()).await.unwrap();

        let symbols = store.currency_symbols().await.unwrap();
        assert_eq!(symbols.len(), 3);
        assert_eq!(symbols[0], CurrencySymbol::new("EUR", "Euro"));
    }

    #[tokio::test]
    async fn test_subscriber_observes_commit() {
        let store = setup_store().await;
        let mut rx = store.subscribe_exchange_rates();

        store.save_exchange_rates(&test_rates()).await.unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 3);
        assert_eq!(rx.borrow()[0], CurrencyRate::new("EUR", 1.0));
    }

    #[tokio::test]
    async fn test_reopen_seeds_subscribers_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("cache/currency.db").display()
        );

        {
            let store = SqliteStore::new(&url).await.unwrap();
            store.save_exchange_rates(&test_rates()).await.unwrap();
            store.pool().close().await;
        }

        let reopened = SqliteStore::new(&url).await.unwrap();
        assert_eq!(reopened.subscribe_exchange_rates().borrow().len(), 3);
        assert_eq!(reopened.exchange_rates().await.unwrap().len(), 3);
    }

    fn batch(prefix: char) -> Vec<CurrencyRate> {
        (0..200)
            .map(|i| CurrencyRate::new(format!("{prefix}{i:03}"), 1.0 + i as f64))
            .collect()
    }

    /// Every code in a snapshot must come from the same save.
    fn assert_single_batch(snapshot: &[CurrencyRate]) {
        if let Some(first) = snapshot.first() {
            let prefix = &first.currency_code[..1];
            assert!(
                snapshot.iter().all(|r| r.currency_code.starts_with(prefix)),
                "snapshot mixes saves: {} rows starting with {prefix}",
                snapshot.len()
            );
            assert_eq!(snapshot.len(), 200);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_never_mix_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("currency.db").display());
        let store = Arc::new(SqliteStore::new(&url).await.unwrap());
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let store = store.clone();
            let done = done.clone();
            tokio::spawn(async move {
                while !done.load(Ordering::Acquire) {
                    assert_single_batch(&store.exchange_rates().await.unwrap());
                    tokio::task::yield_now().await;
                }
            })
        };

        for _ in 0..20 {
            let saves: Vec<_> = ['A', 'B']
                .into_iter()
                .map(|prefix| {
                    let store = store.clone();
                    tokio::spawn(async move { store.save_exchange_rates(&batch(prefix)).await })
                })
                .collect();
            for save in saves {
                save.await.unwrap().unwrap();
            }

            let committed = store.exchange_rates().await.unwrap();
            assert_single_batch(&committed);
            assert_eq!(*store.subscribe_exchange_rates().borrow(), committed);
        }

        done.store(true, Ordering::Release);
        reader.await.unwrap();
    }
}
