//! Resident memory of VM processes.
//!
//! Linux hosts read `/proc/<pid>/statm` directly; everywhere else the
//! counters come from `sysinfo`, which only knows RSS and virtual size.

mod procfs;
mod sysinfo_inspector;

use std::sync::Arc;

use hostarb_core::ports::{ProbeError, ProcessInspector};

pub use procfs::ProcfsProcessInspector;
pub use sysinfo_inspector::SysinfoProcessInspector;

/// The most detailed process inspector available on this platform.
pub fn default_process_inspector() -> Result<Arc<dyn ProcessInspector>, ProbeError> {
    if cfg!(target_os = "linux") {
        Ok(Arc::new(ProcfsProcessInspector::new()?))
    } else {
        Ok(Arc::new(SysinfoProcessInspector::new()))
    }
}
