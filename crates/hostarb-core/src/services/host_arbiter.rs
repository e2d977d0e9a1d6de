//! `HostArbiter` - the arbitration facade.
//!
//! Adapters (CLI, API servers) receive a `HostArbiter` and reach every
//! arbitration service through it.

use crate::domain::RESOLUTIONS;
use crate::ports::HostPorts;
use crate::settings::Settings;

use super::{
    DisplayAccessResolver, DisplayPortAllocator, MemoryAvailabilityEstimator,
    MemoryUsageClassifier, NicService,
};

/// The core arbitration facade.
///
/// Constructed at the adapter's composition root with concrete port
/// implementations.
///
/// # Example
///
/// ```ignore
/// let ports = HostPorts { vms, devices, processes, memory, display, address };
/// let arbiter = HostArbiter::new(ports, &settings);
///
/// let free = arbiter.memory().available_memory(false).await?;
/// let pair = arbiter.display_ports().next_port_pair().await?;
/// ```
pub struct HostArbiter {
    memory: MemoryAvailabilityEstimator,
    memory_usage: MemoryUsageClassifier,
    display_ports: DisplayPortAllocator,
    display_access: DisplayAccessResolver,
    nics: NicService,
}

impl HostArbiter {
    /// Assemble every service from `ports`, tuned by `settings`.
    pub fn new(ports: HostPorts, settings: &Settings) -> Self {
        Self {
            memory: MemoryAvailabilityEstimator::new(
                ports.vms.clone(),
                ports.processes,
                ports.memory,
            )
            .with_free_memory_percent(settings.effective_free_memory_percent()),
            memory_usage: MemoryUsageClassifier::new(ports.vms),
            display_ports: DisplayPortAllocator::new(ports.devices.clone(), ports.display.clone())
                .with_range(settings.effective_display_port_range())
                .with_reserved(settings.effective_reserved_web_ports()),
            display_access: DisplayAccessResolver::new(
                ports.devices.clone(),
                ports.display,
                ports.address,
            ),
            nics: NicService::new(ports.devices),
        }
    }

    /// Access the memory availability estimator.
    pub const fn memory(&self) -> &MemoryAvailabilityEstimator {
        &self.memory
    }

    /// Access the memory usage classifier.
    pub const fn memory_usage(&self) -> &MemoryUsageClassifier {
        &self.memory_usage
    }

    /// Access the display port allocator.
    pub const fn display_ports(&self) -> &DisplayPortAllocator {
        &self.display_ports
    }

    /// Access the display access resolver.
    pub const fn display_access(&self) -> &DisplayAccessResolver {
        &self.display_access
    }

    /// Access the NIC service.
    pub const fn nics(&self) -> &NicService {
        &self.nics
    }

    /// Supported display resolutions.
    pub fn resolution_choices(&self) -> &'static [&'static str] {
        &RESOLUTIONS
    }
}
