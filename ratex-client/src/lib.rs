//! # Ratex Client
//!
//! Outbound adapters for the currency converter:
//! - `FixerClient` - `RateProvider` over the Fixer-style REST API
//! - `TcpProbe` / `ManualConnectivity` - `ConnectivityOracle` implementations

pub mod config;
pub mod connectivity;
pub mod fixer;

pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ProviderConfig};
pub use connectivity::{DEFAULT_PROBE_ADDR, ManualConnectivity, TcpProbe};
pub use fixer::FixerClient;
