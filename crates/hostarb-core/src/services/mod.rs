//! Core services - the arbitration logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! Each operation is an independent request: nothing is cached between
//! calls and no lock is held across port queries.

mod display_access;
mod display_ports;
mod host_arbiter;
mod memory_estimator;
mod memory_usage;
mod nic_service;

pub use display_access::{DisplayAccessResolver, normalize_host};
pub use display_ports::DisplayPortAllocator;
pub use host_arbiter::HostArbiter;
pub use memory_estimator::MemoryAvailabilityEstimator;
pub use memory_usage::MemoryUsageClassifier;
pub use nic_service::NicService;

use tracing::debug;

use crate::domain::{Vm, VmStatus};
use crate::ports::{CoreError, RepositoryError, VmRepository};

/// Live status of `vm`, or `None` if the VM disappeared after being listed.
async fn live_status(vms: &dyn VmRepository, vm: &Vm) -> Result<Option<VmStatus>, CoreError> {
    match vms.status(vm.id).await {
        Ok(status) => Ok(Some(status)),
        Err(RepositoryError::NotFound(_)) => {
            debug!(vm_id = vm.id, "VM removed while listing, skipping");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
