//! Provider configuration.

use std::fmt;
use std::time::Duration;

/// Default Fixer API root.
pub const DEFAULT_BASE_URL: &str = "https://data.fixer.io/api";

/// Connect and request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Explicit configuration passed to the rate provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::new("secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::new("secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
