//! # hostarb-core
//!
//! Domain types, port definitions and services for VM host resource
//! arbitration: memory availability, memory accounting, display port
//! allocation and display access URIs.
//!
//! Core never touches the operating system. Everything it needs from the
//! host (memory counters, process tables, VM records) arrives through the
//! traits in [`ports`]; concrete adapters live in `hostarb-runtime`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use domain::{
    Device, DeviceAttributes, DeviceFilter, DeviceId, DeviceKind, DisplayAttributes,
    DisplayCredentials, DisplayDeviceView, MemoryBucket, MemorySnapshot, MemoryUsage,
    NicAttributes, PortPair, RESOLUTIONS, ResidentMemory, Vm, VmId, VmState, VmStatus,
};
pub use ports::{
    CoreError, DeviceRepository, DisplayProtocol, HostMemoryProbe, HostPorts,
    LocalAddressResolver, ProbeError, ProcessInspector, ProcessLookupError, RepositoryError,
    StaticAddressResolver, VmRepository, VncWebProtocol,
};
pub use services::{
    DisplayAccessResolver, DisplayPortAllocator, HostArbiter, MemoryAvailabilityEstimator,
    MemoryUsageClassifier, NicService, normalize_host,
};
pub use settings::{
    DEFAULT_DISPLAY_PORT_END, DEFAULT_DISPLAY_PORT_START, DEFAULT_FREE_MEMORY_PERCENT,
    DEFAULT_RESERVED_WEB_PORTS, Settings, SettingsError, load_settings, validate_settings,
};

pub use paths::{PathError, data_root, inventory_path, settings_path};
