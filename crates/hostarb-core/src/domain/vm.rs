//! VM records and their live run status.

use serde::{Deserialize, Serialize};

/// Identifier of a VM record.
pub type VmId = i64;

/// Bytes per megabyte as used for VM memory sizes.
pub const MIB: u64 = 1024 * 1024;

/// A configured virtual machine.
///
/// Only the fields read by the arbitration services are modelled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vm {
    pub id: VmId,
    pub name: String,
    /// Configured memory size in megabytes.
    pub memory_mb: u64,
    /// Whether the VM is provisioned to start with the host.
    #[serde(default)]
    pub autostart: bool,
}

impl Vm {
    /// Configured memory size in bytes.
    pub const fn memory_bytes(&self) -> u64 {
        self.memory_mb.saturating_mul(MIB)
    }
}

/// Run state reported for a VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VmState {
    Running,
    #[default]
    Stopped,
    Suspended,
}

impl std::fmt::Display for VmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
            Self::Suspended => "SUSPENDED",
        };
        f.write_str(s)
    }
}

/// Live status of a VM at the time of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VmStatus {
    pub state: VmState,
    /// PID of the process backing the VM, if one was recorded.
    #[serde(default)]
    pub pid: Option<u32>,
}

impl VmStatus {
    /// Status of a running VM backed by `pid`.
    pub const fn running(pid: u32) -> Self {
        Self {
            state: VmState::Running,
            pid: Some(pid),
        }
    }

    /// Status of a stopped VM.
    pub const fn stopped() -> Self {
        Self {
            state: VmState::Stopped,
            pid: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == VmState::Running
    }
}
