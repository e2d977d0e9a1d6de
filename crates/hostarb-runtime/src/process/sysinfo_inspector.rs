//! Portable process inspection through `sysinfo`.

use async_trait::async_trait;
use hostarb_core::domain::ResidentMemory;
use hostarb_core::ports::{ProcessInspector, ProcessLookupError};
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Reports RSS and virtual size only; the remaining counters stay zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProcessInspector;

impl SysinfoProcessInspector {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessInspector for SysinfoProcessInspector {
    async fn resident_memory(&self, pid: u32) -> Result<ResidentMemory, ProcessLookupError> {
        let target = Pid::from_u32(pid);
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[target]), true);

        let process = sys.process(target).ok_or(ProcessLookupError::NotFound(pid))?;
        Ok(ResidentMemory {
            rss: process.memory(),
            vms: process.virtual_memory(),
            ..ResidentMemory::default()
        })
    }
}
