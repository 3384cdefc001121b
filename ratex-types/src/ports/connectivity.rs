//! Network reachability port.

/// Point-in-time reachability check.
///
/// The answer may be stale by the time the caller acts on it.
pub trait ConnectivityOracle: Send + Sync + 'static {
    fn is_internet_available(&self) -> bool;
}

impl<T: ConnectivityOracle + ?Sized> ConnectivityOracle for Box<T> {
    fn is_internet_available(&self) -> bool {
        (**self).is_internet_available()
    }
}

impl<T: ConnectivityOracle + ?Sized> ConnectivityOracle for std::sync::Arc<T> {
    fn is_internet_available(&self) -> bool {
        (**self).is_internet_available()
    }
}
