//! Host memory probe implementation.
//!
//! Provides `SysinfoMemoryProbe`, the runtime side of the
//! `HostMemoryProbe` contract.

mod arc;
mod page;

use std::path::PathBuf;

use hostarb_core::domain::MemorySnapshot;
use hostarb_core::ports::{HostMemoryProbe, ProbeError};
use sysinfo::System;
use tracing::debug;

pub use arc::{ArcSizes, DEFAULT_ARCSTATS_PATH, parse_arcstats, read_arc_sizes};
pub use page::page_size;

/// Samples host memory through `sysinfo` and the ZFS ARC kstats.
///
/// Hosts without ZFS report an ARC of zero.
#[derive(Debug, Clone)]
pub struct SysinfoMemoryProbe {
    arcstats_path: PathBuf,
}

impl SysinfoMemoryProbe {
    /// Create a probe reading ARC sizes from the default kstat location.
    pub fn new() -> Self {
        Self {
            arcstats_path: PathBuf::from(DEFAULT_ARCSTATS_PATH),
        }
    }

    /// Read ARC sizes from `path` instead.
    #[must_use]
    pub fn with_arcstats_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.arcstats_path = path.into();
        self
    }
}

impl Default for SysinfoMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap bytes expressed in whole pages, rounding a partial page up.
fn swap_pages(bytes: u64, page_size: u64) -> u64 {
    bytes.div_ceil(page_size.max(1))
}

impl HostMemoryProbe for SysinfoMemoryProbe {
    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError> {
        let mut sys = System::new();
        sys.refresh_memory();

        if sys.total_memory() == 0 {
            return Err(ProbeError::MemoryQueryFailed(
                "host reported no physical memory".to_string(),
            ));
        }

        let page = self.page_size()?;
        let arc = read_arc_sizes(&self.arcstats_path);

        let snapshot = MemorySnapshot {
            available_bytes: sys.available_memory(),
            swap_used_pages: swap_pages(sys.used_swap(), page),
            arc_total_bytes: arc.size,
            arc_min_bytes: arc.c_min,
        };
        debug!(?snapshot, "Sampled host memory");
        Ok(snapshot)
    }

    fn page_size(&self) -> Result<u64, ProbeError> {
        page_size()
    }
}
