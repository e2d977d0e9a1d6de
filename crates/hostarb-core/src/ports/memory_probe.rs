//! Host memory probe port.
//!
//! Core owns the trait and snapshot type; the runtime crate samples the
//! actual counters (sysinfo, ZFS kstats, sysconf).

use super::ProbeError;
use crate::domain::MemorySnapshot;

/// Port for sampling host memory state.
#[cfg_attr(test, mockall::automock)]
pub trait HostMemoryProbe: Send + Sync {
    /// Sample available memory, swap usage and ARC sizes.
    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError>;

    /// Bytes per memory page on this host.
    fn page_size(&self) -> Result<u64, ProbeError>;
}
