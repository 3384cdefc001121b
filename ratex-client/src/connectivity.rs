//! Connectivity oracle adapters.

use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};

use ratex_types::ConnectivityOracle;

/// Default probe target: the rate provider's HTTPS endpoint.
pub const DEFAULT_PROBE_ADDR: &str = "data.fixer.io:443";

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1500);

/// Reports online when a TCP connection to `addr` can be opened.
///
/// Resolution and connect are blocking. Inside a multi-thread tokio runtime
/// the probe runs under `block_in_place` so other tasks move off the worker;
/// elsewhere it blocks the calling thread for at most `timeout` per resolved
/// address.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_ADDR)
    }
}

impl TcpProbe {
    fn probe(&self) -> bool {
        let addrs = match self.addr.to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                tracing::debug!(addr = %self.addr, error = %e, "Probe address did not resolve");
                return false;
            }
        };

        let online = addrs
            .into_iter()
            .any(|a| TcpStream::connect_timeout(&a, self.timeout).is_ok());
        tracing::debug!(addr = %self.addr, online, "Connectivity probe");
        online
    }
}

impl ConnectivityOracle for TcpProbe {
    fn is_internet_available(&self) -> bool {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| self.probe())
            }
            _ => self.probe(),
        }
    }
}

/// Connectivity flag set by the caller, e.g. from an `--offline` switch.
#[derive(Debug)]
pub struct ManualConnectivity {
    online: AtomicBool,
}

impl ManualConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl ConnectivityOracle for ManualConnectivity {
    fn is_internet_available(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}
