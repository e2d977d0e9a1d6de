//! # hostarb-runtime
//!
//! OS-level adapters for the ports defined in `hostarb-core`:
//!
//! - [`system::SysinfoMemoryProbe`] - available memory and swap via
//!   `sysinfo`, ARC sizes from the ZFS kstats, page size via `sysconf`
//! - [`process`] - resident memory of VM processes (procfs or `sysinfo`)
//! - [`network::UdpLocalAddressResolver`] - primary interface address
//! - [`inventory::JsonInventory`] - read-only VM/device inventory snapshot

#![deny(unsafe_code)]

pub mod inventory;
pub mod network;
pub mod process;
pub mod system;

pub use inventory::{InventoryError, JsonInventory};
pub use network::UdpLocalAddressResolver;
pub use process::{ProcfsProcessInspector, SysinfoProcessInspector, default_process_inspector};
pub use system::{SysinfoMemoryProbe, page_size};
