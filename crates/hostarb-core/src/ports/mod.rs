//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the arbitration services expect from
//! the host. They contain no implementation details and use only domain
//! types.
//!
//! # Design Rules
//!
//! - No procfs, socket or inventory-format details in any signature
//! - Repositories are query-only; mutation belongs to VM management
//! - Process lookups fail distinctly when the process is gone

pub mod address_resolver;
pub mod device_repository;
pub mod display_protocol;
pub mod memory_probe;
pub mod process_inspector;
pub mod vm_repository;

use std::sync::Arc;
use thiserror::Error;

pub use address_resolver::{LocalAddressResolver, StaticAddressResolver};
pub use device_repository::DeviceRepository;
pub use display_protocol::{DisplayProtocol, VncWebProtocol};
pub use memory_probe::HostMemoryProbe;
pub use process_inspector::ProcessInspector;
pub use vm_repository::VmRepository;

#[cfg(test)]
pub use address_resolver::MockLocalAddressResolver;
#[cfg(test)]
pub use memory_probe::MockHostMemoryProbe;

/// Container for every collaborator the arbitration services consume.
///
/// Lives in core so that `HostArbiter` can be assembled without knowing
/// which adapters back it.
#[derive(Clone)]
pub struct HostPorts {
    /// VM records and live status.
    pub vms: Arc<dyn VmRepository>,
    /// Device records.
    pub devices: Arc<dyn DeviceRepository>,
    /// Resident memory lookups for VM processes.
    pub processes: Arc<dyn ProcessInspector>,
    /// Host memory, swap and ARC counters.
    pub memory: Arc<dyn HostMemoryProbe>,
    /// Web port and URI rules for display devices.
    pub display: Arc<dyn DisplayProtocol>,
    /// Fallback host for display URIs.
    pub address: Arc<dyn LocalAddressResolver>,
}

/// Domain-specific errors for inventory queries.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (file, database, remote service).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while probing host state.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// System memory query failed.
    #[error("Memory query failed: {0}")]
    MemoryQueryFailed(String),

    /// Page size could not be determined.
    #[error("Page size query failed: {0}")]
    PageSizeFailed(String),

    /// No local interface address could be resolved.
    #[error("Local address resolution failed: {0}")]
    AddressUnavailable(String),
}

/// Errors from a process memory lookup.
#[derive(Debug, Error)]
pub enum ProcessLookupError {
    /// The process exited between enumeration and inspection.
    #[error("No such process: {0}")]
    NotFound(u32),

    /// The process exists but its memory counters could not be read.
    #[error("Cannot read memory of process {pid}: {reason}")]
    Unreadable { pid: u32, reason: String },
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, HTTP
/// status codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Inventory query failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Host probe failed.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Every port in the display range is taken.
    #[error("No free display port in range {start}-{end}")]
    PortsExhausted { start: u16, end: u16 },
}
