//! Error types for the currency converter.

/// Coarse cause of a provider failure, used to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// DNS resolution failed or no route to the host.
    HostUnreachable,
    /// Any other transport-level I/O failure, including timeouts.
    Io,
    Other,
}

/// Remote rate provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("API error: {code} - {message}")]
    Api { code: u16, message: String },

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Unreachable(_) => FailureKind::HostUnreachable,
            ProviderError::Network(_) => FailureKind::Io,
            ProviderError::Decode(_) | ProviderError::Api { .. } | ProviderError::Other(_) => {
                FailureKind::Other
            }
        }
    }
}

/// Local cache errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Decode(String),
}

/// Failures surfaced through a terminal `Outcome::Error`.
///
/// The display string is exactly what the presentation layer renders.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("No internet connection.")]
    NoConnectivity,

    #[error("{0}")]
    RemoteFailure(String),
}

impl RepositoryError {
    /// Classifies a provider failure into a user-facing message.
    pub fn remote(err: &ProviderError) -> Self {
        let message = match err.kind() {
            FailureKind::HostUnreachable => {
                "No internet connection. Please check your network.".to_string()
            }
            FailureKind::Io => "Network error. Please try again.".to_string(),
            FailureKind::Other => {
                let raw = err.to_string();
                if raw.trim().is_empty() {
                    "Unknown error occurred".to_string()
                } else {
                    raw
                }
            }
        };
        RepositoryError::RemoteFailure(message)
    }
}

/// Errors returned directly by `convert_currency`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("No internet connection. Please connect to proceed.")]
    NoConnectivity,

    #[error("Exchange rates are not available")]
    RatesUnavailable,

    #[error("Exchange rate for {0} not found")]
    UnknownCurrency(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
