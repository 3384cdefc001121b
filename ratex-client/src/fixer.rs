//! Fixer-compatible rate provider over HTTP.

use std::error::Error;
use std::io;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use ratex_types::dto::ProviderErrorBody;
use ratex_types::{ExchangeRatesResponse, ProviderError, RateProvider, SymbolsResponse};

use crate::config::ProviderConfig;

/// Query parameter carrying the API key on every request.
const ACCESS_KEY_PARAM: &str = "access_key";

/// HTTP client for the `latest` and `symbols` endpoints.
pub struct FixerClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl FixerClient {
    /// Creates a new client from explicit configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Other(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[(ACCESS_KEY_PARAM, self.api_key.as_str())])
            .send()
            .await
            .map_err(classify)?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = resp.status();
        let body = resp.text().await.map_err(classify)?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| error_body(&v))
                .map(|e| e.message())
                .unwrap_or(body);
            return Err(ProviderError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        // Fixer reports failures with HTTP 200 and `"success": false`.
        if value.get("success").and_then(|s| s.as_bool()) == Some(false) {
            let err = error_body(&value);
            return Err(ProviderError::Api {
                code: err.as_ref().map_or(status.as_u16(), |e| e.code),
                message: err
                    .map(|e| e.message())
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            });
        }

        serde_json::from_value(value).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

fn error_body(value: &serde_json::Value) -> Option<ProviderErrorBody> {
    value
        .get("error")
        .and_then(|e| serde_json::from_value(e.clone()).ok())
}

/// Maps a transport error onto the provider taxonomy.
///
/// Only name resolution and routing failures count as unreachable; a refused
/// or reset connection is an ordinary network error.
fn classify(err: reqwest::Error) -> ProviderError {
    if is_unreachable(&err) {
        ProviderError::Unreachable(err.to_string())
    } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        ProviderError::Network(err.to_string())
    } else if err.is_decode() {
        ProviderError::Decode(err.to_string())
    } else {
        ProviderError::Other(err.to_string())
    }
}

/// Walks the source chain looking for a DNS failure or an unroutable host.
fn is_unreachable(err: &(dyn Error + 'static)) -> bool {
    let mut cause = Some(err);
    while let Some(e) = cause {
        if let Some(io) = e.downcast_ref::<io::Error>() {
            if matches!(
                io.kind(),
                io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable
            ) {
                return true;
            }
        }
        // hyper-util reports resolver failures as "dns error: ...".
        if e.to_string().starts_with("dns error") {
            return true;
        }
        cause = e.source();
    }
    false
}

#[async_trait]
impl RateProvider for FixerClient {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_exchange_rates(&self) -> Result<ExchangeRatesResponse, ProviderError> {
        let resp: ExchangeRatesResponse = self.get("/latest").await?;
        tracing::debug!(base = %resp.base, count = resp.rates.len(), "Fetched exchange rates");
        Ok(resp)
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_currency_symbols(&self) -> Result<SymbolsResponse, ProviderError> {
        let resp: SymbolsResponse = self.get("/symbols").await?;
        tracing::debug!(count = resp.symbols.len(), "Fetched currency symbols");
        Ok(resp)
    }
}
