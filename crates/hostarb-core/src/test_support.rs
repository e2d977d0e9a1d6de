//! In-memory port implementations shared by service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Device, DeviceFilter, MemorySnapshot, ResidentMemory, Vm, VmId, VmStatus};
use crate::ports::{
    DeviceRepository, HostMemoryProbe, HostPorts, ProbeError, ProcessInspector,
    ProcessLookupError, RepositoryError, StaticAddressResolver, VmRepository, VncWebProtocol,
};

pub fn vm(id: VmId, memory_mb: u64, autostart: bool) -> Vm {
    Vm {
        id,
        name: format!("vm{id}"),
        memory_mb,
        autostart,
    }
}

#[derive(Default)]
pub struct StubVms {
    vms: Vec<Vm>,
    statuses: HashMap<VmId, VmStatus>,
}

impl StubVms {
    pub fn with(mut self, vm: Vm, status: VmStatus) -> Self {
        self.statuses.insert(vm.id, status);
        self.vms.push(vm);
        self
    }
}

#[async_trait]
impl VmRepository for StubVms {
    async fn list(&self) -> Result<Vec<Vm>, RepositoryError> {
        Ok(self.vms.clone())
    }

    async fn status(&self, id: VmId) -> Result<VmStatus, RepositoryError> {
        self.statuses
            .get(&id)
            .copied()
            .ok_or_else(|| RepositoryError::NotFound(format!("vm id={id}")))
    }
}

#[derive(Default)]
pub struct StubDevices {
    devices: Vec<Device>,
}

impl StubDevices {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

#[async_trait]
impl DeviceRepository for StubDevices {
    async fn list(&self, filter: &DeviceFilter) -> Result<Vec<Device>, RepositoryError> {
        Ok(self
            .devices
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }
}

/// Processes not in the table are reported as gone.
#[derive(Default)]
pub struct StubProcesses {
    table: HashMap<u32, ResidentMemory>,
    unreadable: HashSet<u32>,
}

impl StubProcesses {
    pub fn with(mut self, pid: u32, resident: ResidentMemory) -> Self {
        self.table.insert(pid, resident);
        self
    }

    /// `pid` exists but its memory counters cannot be read.
    pub fn unreadable(mut self, pid: u32) -> Self {
        self.unreadable.insert(pid);
        self
    }
}

#[async_trait]
impl ProcessInspector for StubProcesses {
    async fn resident_memory(&self, pid: u32) -> Result<ResidentMemory, ProcessLookupError> {
        if self.unreadable.contains(&pid) {
            return Err(ProcessLookupError::Unreadable {
                pid,
                reason: "permission denied".to_string(),
            });
        }
        self.table
            .get(&pid)
            .copied()
            .ok_or(ProcessLookupError::NotFound(pid))
    }
}

pub struct FixedProbe {
    pub snapshot: MemorySnapshot,
    pub page_size: u64,
}

impl HostMemoryProbe for FixedProbe {
    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError> {
        Ok(self.snapshot)
    }

    fn page_size(&self) -> Result<u64, ProbeError> {
        Ok(self.page_size)
    }
}

/// Resident memory with only `rss` populated.
pub fn rss(bytes: u64) -> ResidentMemory {
    ResidentMemory {
        rss: bytes,
        ..ResidentMemory::default()
    }
}

pub fn ports(vms: StubVms, devices: StubDevices, processes: StubProcesses) -> HostPorts {
    HostPorts {
        vms: Arc::new(vms),
        devices: Arc::new(devices),
        processes: Arc::new(processes),
        memory: Arc::new(FixedProbe {
            snapshot: MemorySnapshot::default(),
            page_size: 4096,
        }),
        display: Arc::new(VncWebProtocol),
        address: Arc::new(StaticAddressResolver::new("127.0.0.1")),
    }
}
