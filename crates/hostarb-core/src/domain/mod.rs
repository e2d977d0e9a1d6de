//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (inventory storage, procfs, sockets).
//!
//! # Structure
//!
//! - `vm` - VM records and live run status
//! - `device` - Display and NIC devices plus query filters
//! - `memory` - Host memory snapshots and accounting buckets
//! - `display` - Port pairs, credentials and resolution choices
//! - `nic` - MAC address generation

mod device;
mod display;
mod memory;
pub mod nic;
mod vm;

pub use device::{
    Device, DeviceAttributes, DeviceFilter, DeviceId, DeviceKind, DisplayAttributes,
    DisplayDeviceView, NicAttributes,
};
pub use display::{DisplayCredentials, PortPair, RESOLUTIONS};
pub use memory::{MemoryBucket, MemorySnapshot, MemoryUsage, ResidentMemory};
pub use vm::{MIB, Vm, VmId, VmState, VmStatus};
