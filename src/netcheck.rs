//! TCP reachability check for a host and port.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::ConnectError;

/// Timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One host/port pair to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCheck {
    /// Host name or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Upper bound for each connection attempt
    pub timeout: Duration,
}

impl HostCheck {
    /// Create a check with the default timeout.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-address connection timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect to the first resolved address that accepts and close again.
    ///
    /// Addresses are tried in resolver order; the error of the last failed
    /// attempt is reported when none accepts.
    pub fn check(&self) -> Result<SocketAddr, ConnectError> {
        if self.timeout.is_zero() {
            return Err(ConnectError::ZeroTimeout);
        }

        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ConnectError::Resolve {
                host: self.host.clone(),
                source,
            })?;

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_stream) => {
                    log::info!("Connected to {}:{} via {}", self.host, self.port, addr);
                    return Ok(addr);
                }
                Err(e) => {
                    log::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(source) => Err(ConnectError::Unreachable {
                host: self.host.clone(),
                port: self.port,
                source,
            }),
            None => Err(ConnectError::NoAddress {
                host: self.host.clone(),
            }),
        }
    }
}
