//! Display port allocation.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use tracing::info;

use crate::domain::{DeviceFilter, DeviceKind, PortPair};
use crate::ports::{CoreError, DeviceRepository, DisplayProtocol};
use crate::settings::{DEFAULT_DISPLAY_PORT_END, DEFAULT_DISPLAY_PORT_START, DEFAULT_RESERVED_WEB_PORTS};

/// Picks the lowest display port no existing display device is bound to.
pub struct DisplayPortAllocator {
    devices: Arc<dyn DeviceRepository>,
    protocol: Arc<dyn DisplayProtocol>,
    range: Range<u16>,
    reserved: Vec<u16>,
}

impl DisplayPortAllocator {
    pub fn new(devices: Arc<dyn DeviceRepository>, protocol: Arc<dyn DisplayProtocol>) -> Self {
        Self {
            devices,
            protocol,
            range: DEFAULT_DISPLAY_PORT_START..DEFAULT_DISPLAY_PORT_END,
            reserved: DEFAULT_RESERVED_WEB_PORTS.to_vec(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: Range<u16>) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_reserved(mut self, reserved: Vec<u16>) -> Self {
        self.reserved = reserved;
        self
    }

    /// Next free display port and the web port paired with it.
    ///
    /// Deterministic for a fixed device population. Fails with
    /// `CoreError::PortsExhausted` when every port in the range is taken.
    pub async fn next_port_pair(&self) -> Result<PortPair, CoreError> {
        let displays = self
            .devices
            .list(&DeviceFilter::of_kind(DeviceKind::Display))
            .await?;

        let taken: HashSet<u16> = displays
            .iter()
            .filter_map(|d| d.as_display().and_then(|attrs| attrs.port))
            .chain(self.reserved.iter().copied())
            .collect();

        let port = self
            .range
            .clone()
            .find(|port| !taken.contains(port))
            .ok_or(CoreError::PortsExhausted {
                start: self.range.start,
                end: self.range.end,
            })?;

        let pair = PortPair {
            port,
            web: self.protocol.web_port(port),
        };
        info!(port = pair.port, web = pair.web, "Allocated display port");
        Ok(pair)
    }
}
