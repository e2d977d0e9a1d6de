//! Configured VM memory accounting.

use std::sync::Arc;

use super::live_status;
use crate::domain::{MemoryBucket, MemoryUsage};
use crate::ports::{CoreError, VmRepository};

/// Aggregates configured VM memory into the RNP / PRD / RPRD buckets.
pub struct MemoryUsageClassifier {
    vms: Arc<dyn VmRepository>,
}

impl MemoryUsageClassifier {
    pub fn new(vms: Arc<dyn VmRepository>) -> Self {
        Self { vms }
    }

    /// Configured memory of every VM, charged to at most one bucket each.
    pub async fn memory_in_use(&self) -> Result<MemoryUsage, CoreError> {
        let mut usage = MemoryUsage::default();

        for vm in self.vms.list().await? {
            let Some(status) = live_status(self.vms.as_ref(), &vm).await? else {
                continue;
            };
            if let Some(bucket) = MemoryBucket::classify(&vm, &status) {
                usage.add(bucket, vm.memory_bytes());
            }
        }

        Ok(usage)
    }
}
