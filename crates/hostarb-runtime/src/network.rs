//! Primary interface address discovery.

use std::net::{SocketAddr, UdpSocket};

use hostarb_core::ports::{LocalAddressResolver, ProbeError};
use tracing::debug;

/// Routable public address used only to pick an outgoing interface.
const DEFAULT_ROUTE_PROBE: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Finds the address of the interface the default route leaves through.
///
/// Connecting a UDP socket sends no packets; it only makes the kernel pick
/// a source address.
#[derive(Debug, Clone, Copy)]
pub struct UdpLocalAddressResolver {
    target: SocketAddr,
}

impl UdpLocalAddressResolver {
    pub const fn new() -> Self {
        Self {
            target: DEFAULT_ROUTE_PROBE,
        }
    }

    /// Resolve the interface used to reach `target` instead.
    #[must_use]
    pub const fn with_target(target: SocketAddr) -> Self {
        Self { target }
    }
}

impl Default for UdpLocalAddressResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalAddressResolver for UdpLocalAddressResolver {
    fn local_address(&self) -> Result<String, ProbeError> {
        let bind = if self.target.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let unavailable = |e: std::io::Error| ProbeError::AddressUnavailable(e.to_string());

        let socket = UdpSocket::bind(bind).map_err(unavailable)?;
        socket.connect(self.target).map_err(unavailable)?;
        let ip = socket.local_addr().map_err(unavailable)?.ip();

        if ip.is_unspecified() {
            return Err(ProbeError::AddressUnavailable(format!(
                "no route towards {}",
                self.target
            )));
        }
        debug!(%ip, target = %self.target, "Resolved local address");
        Ok(ip.to_string())
    }
}
