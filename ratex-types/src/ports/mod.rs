//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The repository depends on these traits, not concrete implementations.

mod connectivity;
mod provider;
mod store;

pub use connectivity::ConnectivityOracle;
pub use provider::RateProvider;
pub use store::RateStore;
