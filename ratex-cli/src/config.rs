//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use ratex_client::{DEFAULT_BASE_URL, DEFAULT_PROBE_ADDR, DEFAULT_TIMEOUT, ProviderConfig};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://currency.db?mode=rwc";

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub provider: ProviderConfig,
    pub database_url: String,
    pub probe_addr: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// `FIXER_API_KEY` is required unless `offline` is set, since the
    /// provider is never called then.
    pub fn from_env(offline: bool) -> anyhow::Result<Self> {
        Self::from_vars(offline, |name| env::var(name).ok())
    }

    fn from_vars(offline: bool, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = match var("FIXER_API_KEY") {
            Some(key) => key,
            None if offline => String::new(),
            None => anyhow::bail!("FIXER_API_KEY environment variable is required"),
        };

        let base_url = var("FIXER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match var("RATEX_HTTP_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(secs.parse()?),
            None => DEFAULT_TIMEOUT,
        };

        let database_url =
            var("RATEX_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let probe_addr = var("RATEX_PROBE_ADDR").unwrap_or_else(|| DEFAULT_PROBE_ADDR.to_string());

        Ok(Self {
            provider: ProviderConfig::new(api_key)
                .with_base_url(base_url)
                .with_timeout(timeout),
            database_url,
            probe_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_api_key_required_online() {
        let err = Config::from_vars(false, vars(&[])).unwrap_err();
        assert!(err.to_string().contains("FIXER_API_KEY"));
    }

    #[test]
    fn test_api_key_optional_offline() {
        let config = Config::from_vars(true, vars(&[])).unwrap();

        assert_eq!(config.provider.api_key, "");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.probe_addr, DEFAULT_PROBE_ADDR);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(
            false,
            vars(&[
                ("FIXER_API_KEY", "secret"),
                ("FIXER_BASE_URL", "http://localhost:9000"),
                ("RATEX_HTTP_TIMEOUT_SECS", "3"),
                ("RATEX_DATABASE_URL", "memory://"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider.api_key, "secret");
        assert_eq!(config.provider.base_url, "http://localhost:9000");
        assert_eq!(config.provider.timeout, Duration::from_secs(3));
        assert_eq!(config.database_url, "memory://");
    }
}
