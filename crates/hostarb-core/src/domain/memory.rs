//! Host memory snapshots and VM memory accounting.

use serde::{Deserialize, Serialize};

use super::vm::{Vm, VmStatus};

/// Point-in-time view of host memory, sampled by a `HostMemoryProbe`.
///
/// Valid only for the duration of a single estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Physical memory the host reports as available, in bytes.
    pub available_bytes: u64,
    /// Swap in use, in pages of the host page size. Probes that count
    /// bytes round a partial page up.
    pub swap_used_pages: u64,
    /// Current ARC size in bytes.
    pub arc_total_bytes: u64,
    /// Floor the ARC may shrink down to, in bytes.
    pub arc_min_bytes: u64,
}

impl MemorySnapshot {
    /// ARC bytes reclaimable under pressure. Zero if the floor exceeds the size.
    pub const fn arc_shrinkable(&self) -> u64 {
        self.arc_total_bytes.saturating_sub(self.arc_min_bytes)
    }
}

/// Resident memory breakdown of a process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentMemory {
    pub rss: u64,
    /// Total virtual size. Address-space reservation, not backed memory.
    pub vms: u64,
    pub shared: u64,
    pub text: u64,
    pub lib: u64,
    pub data: u64,
    pub dirty: u64,
}

impl ResidentMemory {
    /// Sum of every component except the total virtual size.
    pub const fn without_virtual(&self) -> u64 {
        self.rss
            .saturating_add(self.shared)
            .saturating_add(self.text)
            .saturating_add(self.lib)
            .saturating_add(self.data)
            .saturating_add(self.dirty)
    }
}

/// Accounting bucket a VM's configured memory is charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryBucket {
    /// Running, not provisioned for autostart.
    Rnp,
    /// Provisioned for autostart but not running.
    Prd,
    /// Running and provisioned.
    Rprd,
}

impl MemoryBucket {
    /// Bucket for a VM in the given status, first match wins.
    pub fn classify(vm: &Vm, status: &VmStatus) -> Option<Self> {
        match (status.is_running(), vm.autostart) {
            (true, false) => Some(Self::Rnp),
            (true, true) => Some(Self::Rprd),
            (false, true) => Some(Self::Prd),
            (false, false) => None,
        }
    }
}

/// Configured VM memory aggregated per bucket, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    #[serde(rename = "RNP")]
    pub rnp: u64,
    #[serde(rename = "PRD")]
    pub prd: u64,
    #[serde(rename = "RPRD")]
    pub rprd: u64,
}

impl MemoryUsage {
    pub fn add(&mut self, bucket: MemoryBucket, bytes: u64) {
        let slot = match bucket {
            MemoryBucket::Rnp => &mut self.rnp,
            MemoryBucket::Prd => &mut self.prd,
            MemoryBucket::Rprd => &mut self.rprd,
        };
        *slot = slot.saturating_add(bytes);
    }

    pub const fn total(&self) -> u64 {
        self.rnp.saturating_add(self.prd).saturating_add(self.rprd)
    }
}
