//! Presentation-facing state holder.
//!
//! Drives the repository and folds each outcome into a single [`UiState`]
//! that a front end can render or watch for changes.

use std::pin::pin;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;

use ratex_types::{
    ConnectivityOracle, CurrencyRate, CurrencySymbol, Outcome, RateProvider, RateStore,
};

use crate::CurrencyRepository;

/// Everything the conversion screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub is_loading: bool,
    pub exchange_rates: Vec<CurrencyRate>,
    pub currency_symbols: Vec<CurrencySymbol>,
    pub error: Option<String>,
    pub converted_amount: f64,
}

pub struct ConversionViewModel<P, S, C>
where
    P: RateProvider,
    S: RateStore,
    C: ConnectivityOracle,
{
    repository: Arc<CurrencyRepository<P, S, C>>,
    state: watch::Sender<UiState>,
}

impl<P, S, C> ConversionViewModel<P, S, C>
where
    P: RateProvider,
    S: RateStore,
    C: ConnectivityOracle,
{
    pub fn new(repository: Arc<CurrencyRepository<P, S, C>>) -> Self {
        Self {
            repository,
            state: watch::Sender::new(UiState::default()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn repository(&self) -> &CurrencyRepository<P, S, C> {
        &self.repository
    }

    /// Loads rates and symbols concurrently.
    pub async fn refresh(&self) {
        tokio::join!(self.fetch_exchange_rates(), self.fetch_currency_symbols());
    }

    pub async fn fetch_exchange_rates(&self) {
        let mut outcomes = pin!(self.repository.exchange_rates());
        while let Some(outcome) = outcomes.next().await {
            self.state.send_modify(|state| match outcome {
                Outcome::Loading => state.is_loading = true,
                Outcome::Success(rates) => {
                    state.exchange_rates = rates;
                    state.is_loading = false;
                }
                Outcome::Error(message) => {
                    state.error = Some(message);
                    state.is_loading = false;
                }
            });
        }
    }

    pub async fn fetch_currency_symbols(&self) {
        let mut outcomes = pin!(self.repository.currency_symbols());
        while let Some(outcome) = outcomes.next().await {
            self.state.send_modify(|state| match outcome {
                Outcome::Loading => state.is_loading = true,
                Outcome::Success(symbols) => {
                    state.currency_symbols = symbols;
                    state.is_loading = false;
                }
                Outcome::Error(message) => {
                    state.error = Some(message);
                    state.is_loading = false;
                }
            });
        }
    }

    /// Converts and stores either the result or the error's message.
    pub async fn convert_currency(&self, amount: f64, from: &str, to: &str) {
        self.state.send_modify(|state| state.is_loading = true);

        let result = self.repository.convert_currency(amount, from, to).await;

        self.state.send_modify(|state| {
            match result {
                Ok(converted) => state.converted_amount = converted,
                Err(e) => state.error = Some(e.to_string()),
            }
            state.is_loading = false;
        });
    }

    pub fn set_error(&self, message: Option<String>) {
        self.state.send_modify(|state| state.error = message);
    }
}

/// Lenient amount parsing for form input: anything unparseable is zero.
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(0.0)
}
