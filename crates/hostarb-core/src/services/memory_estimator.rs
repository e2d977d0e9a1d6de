//! Memory availability estimation for new VM workloads.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::live_status;
use crate::domain::{ResidentMemory, Vm};
use crate::ports::{CoreError, HostMemoryProbe, ProcessInspector, ProcessLookupError, VmRepository};
use crate::settings::DEFAULT_FREE_MEMORY_PERCENT;

/// A VM with a live backing process and that process's resident memory.
struct VmFootprint {
    vm: Vm,
    resident: ResidentMemory,
}

impl VmFootprint {
    /// Configured allocation not yet backed by resident pages.
    ///
    /// Negative when the process holds more than its configured size.
    fn unbacked_bytes(&self) -> i128 {
        i128::from(self.vm.memory_bytes()) - i128::from(self.resident.without_virtual())
    }
}

/// Estimates how much memory may still be granted to VMs.
///
/// Memory is volatile; the estimate is a point-in-time answer good enough
/// to decide whether a VM should be allowed to launch right now.
pub struct MemoryAvailabilityEstimator {
    vms: Arc<dyn VmRepository>,
    processes: Arc<dyn ProcessInspector>,
    probe: Arc<dyn HostMemoryProbe>,
    free_memory_percent: u8,
}

impl MemoryAvailabilityEstimator {
    pub fn new(
        vms: Arc<dyn VmRepository>,
        processes: Arc<dyn ProcessInspector>,
        probe: Arc<dyn HostMemoryProbe>,
    ) -> Self {
        Self {
            vms,
            processes,
            probe,
            free_memory_percent: DEFAULT_FREE_MEMORY_PERCENT,
        }
    }

    /// Share of the probe's available memory counted as free.
    #[must_use]
    pub const fn with_free_memory_percent(mut self, percent: u8) -> Self {
        self.free_memory_percent = percent;
        self
    }

    /// Bytes that may be allocated to VMs right now.
    ///
    /// With `overcommit` only memory VM processes already hold is charged
    /// (implicitly, through the probe). Without it, the unbacked part of
    /// every running VM's configured allocation is charged as well. ARC
    /// memory above its floor counts as available; used swap does not.
    pub async fn available_memory(&self, overcommit: bool) -> Result<u64, CoreError> {
        let snapshot = self.probe.snapshot()?;
        let page_size = self.probe.page_size()?;

        let free = i128::from(snapshot.available_bytes) * i128::from(self.free_memory_percent) / 100;
        let swap_used = i128::from(snapshot.swap_used_pages) * i128::from(page_size);
        let arc_shrink = i128::from(snapshot.arc_shrinkable());

        let vms_memory_used = if overcommit {
            0
        } else {
            self.committed_vm_memory().await?
        };

        // Per-VM terms may be negative; only the aggregate is clamped.
        let available = (free + arc_shrink - vms_memory_used - swap_used).max(0);

        debug!(
            overcommit,
            free = %free,
            arc_shrink = %arc_shrink,
            swap_used = %swap_used,
            vms_memory_used = %vms_memory_used,
            available = %available,
            "Estimated available memory"
        );

        Ok(u64::try_from(available).unwrap_or(u64::MAX))
    }

    async fn committed_vm_memory(&self) -> Result<i128, CoreError> {
        let footprints = self.running_footprints().await?;
        Ok(footprints.iter().map(VmFootprint::unbacked_bytes).sum())
    }

    /// VMs paired with the resident memory of their backing process.
    ///
    /// VMs without a recorded PID, or whose process has exited since the
    /// status was read, are dropped.
    async fn running_footprints(&self) -> Result<Vec<VmFootprint>, CoreError> {
        let mut candidates = Vec::new();
        for vm in self.vms.list().await? {
            let Some(status) = live_status(self.vms.as_ref(), &vm).await? else {
                continue;
            };
            if let Some(pid) = status.pid {
                candidates.push((vm, pid));
            }
        }

        let footprints: Vec<VmFootprint> = stream::iter(candidates)
            .filter_map(|(vm, pid)| async move {
                match self.processes.resident_memory(pid).await {
                    Ok(resident) => Some(VmFootprint { vm, resident }),
                    Err(ProcessLookupError::NotFound(_)) => {
                        debug!(vm_id = vm.id, pid, "VM process is gone, skipping");
                        None
                    }
                    Err(e) => {
                        warn!(vm_id = vm.id, pid, error = %e, "Cannot inspect VM process, skipping");
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(footprints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MIB, MemorySnapshot, VmStatus};
    use crate::ports::{MockHostMemoryProbe, ProbeError};
    use crate::test_support::{FixedProbe, StubProcesses, StubVms, rss, vm};

    const GIB: u64 = 1024 * MIB;

    fn estimator(vms: StubVms, processes: StubProcesses, snapshot: MemorySnapshot) -> MemoryAvailabilityEstimator {
        MemoryAvailabilityEstimator::new(
            Arc::new(vms),
            Arc::new(processes),
            Arc::new(FixedProbe {
                snapshot,
                page_size: 4096,
            }),
        )
    }

    fn ten_gib() -> MemorySnapshot {
        MemorySnapshot {
            available_bytes: 10 * GIB,
            ..MemorySnapshot::default()
        }
    }

    #[tokio::test]
    async fn test_baseline_is_ninety_percent() {
        let est = estimator(StubVms::default(), StubProcesses::default(), ten_gib());
        assert_eq!(est.available_memory(false).await.unwrap(), 9 * GIB);
    }

    #[tokio::test]
    async fn test_unbacked_allocation_is_charged() {
        let vms = StubVms::default().with(vm(1, 2048, false), VmStatus::running(100));
        let processes = StubProcesses::default().with(100, rss(512 * MIB));
        let est = estimator(vms, processes, ten_gib());

        // 9 GiB free minus (2 GiB configured - 512 MiB resident)
        assert_eq!(est.available_memory(false).await.unwrap(), 9 * GIB - 1536 * MIB);
        assert_eq!(est.available_memory(true).await.unwrap(), 9 * GIB);
    }

    #[tokio::test]
    async fn test_vanished_process_is_skipped() {
        let vms = StubVms::default()
            .with(vm(1, 4096, true), VmStatus::running(100))
            .with(vm(2, 1024, false), VmStatus::running(200));
        let processes = StubProcesses::default().with(200, rss(0));
        let est = estimator(vms, processes, ten_gib());

        assert_eq!(est.available_memory(false).await.unwrap(), 8 * GIB);
    }

    #[tokio::test]
    async fn test_unreadable_process_is_skipped() {
        let vms = StubVms::default()
            .with(vm(1, 4096, false), VmStatus::running(100))
            .with(vm(2, 1024, false), VmStatus::running(200));
        let processes = StubProcesses::default()
            .unreadable(100)
            .with(200, rss(512 * MIB));
        let est = estimator(vms, processes, ten_gib());

        // Only VM 2 is charged: 1 GiB configured - 512 MiB resident.
        assert_eq!(est.available_memory(false).await.unwrap(), 9 * GIB - 512 * MIB);
    }

    #[tokio::test]
    async fn test_vm_without_pid_is_skipped() {
        let vms = StubVms::default().with(vm(1, 4096, true), VmStatus::stopped());
        let est = estimator(vms, StubProcesses::default(), ten_gib());
        assert_eq!(est.available_memory(false).await.unwrap(), 9 * GIB);
    }

    #[tokio::test]
    async fn test_arc_and_swap_adjustments() {
        let snapshot = MemorySnapshot {
            available_bytes: 10 * GIB,
            swap_used_pages: 1024, // 4 MiB at 4 KiB pages
            arc_total_bytes: 3 * GIB,
            arc_min_bytes: GIB,
        };
        let est = estimator(StubVms::default(), StubProcesses::default(), snapshot);
        assert_eq!(
            est.available_memory(true).await.unwrap(),
            9 * GIB + 2 * GIB - 4 * MIB
        );
    }

    #[tokio::test]
    async fn test_only_aggregate_is_clamped() {
        // VM 1 holds 512 MiB more than configured, VM 2 holds nothing of its 1 GiB.
        let vms = StubVms::default()
            .with(vm(1, 512, false), VmStatus::running(10))
            .with(vm(2, 1024, false), VmStatus::running(20));
        let processes = StubProcesses::default()
            .with(10, rss(1024 * MIB))
            .with(20, rss(0));
        let est = estimator(vms, processes, ten_gib());

        assert_eq!(est.available_memory(false).await.unwrap(), 9 * GIB - 512 * MIB);
    }

    #[tokio::test]
    async fn test_never_negative() {
        let snapshot = MemorySnapshot {
            available_bytes: GIB,
            swap_used_pages: u64::MAX,
            ..MemorySnapshot::default()
        };
        let vms = StubVms::default().with(vm(1, u64::MAX, false), VmStatus::running(1));
        let processes = StubProcesses::default().with(1, rss(0));
        let est = estimator(vms, processes, snapshot);

        assert_eq!(est.available_memory(false).await.unwrap(), 0);
        assert_eq!(est.available_memory(true).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overcommit_never_yields_less() {
        let vms = StubVms::default()
            .with(vm(1, 1024, false), VmStatus::running(1))
            .with(vm(2, 3072, true), VmStatus::running(2));
        let processes = StubProcesses::default()
            .with(1, rss(100 * MIB))
            .with(2, rss(3000 * MIB));
        let est = estimator(vms, processes, ten_gib());

        let strict = est.available_memory(false).await.unwrap();
        let relaxed = est.available_memory(true).await.unwrap();
        assert!(relaxed >= strict);
    }

    #[tokio::test]
    async fn test_custom_percent() {
        let est = estimator(StubVms::default(), StubProcesses::default(), ten_gib())
            .with_free_memory_percent(50);
        assert_eq!(est.available_memory(true).await.unwrap(), 5 * GIB);
    }

    #[tokio::test]
    async fn test_probe_failure_propagates() {
        let mut probe = MockHostMemoryProbe::new();
        probe
            .expect_snapshot()
            .returning(|| Err(ProbeError::MemoryQueryFailed("no counters".to_string())));

        let est = MemoryAvailabilityEstimator::new(
            Arc::new(StubVms::default()),
            Arc::new(StubProcesses::default()),
            Arc::new(probe),
        );

        assert!(matches!(
            est.available_memory(false).await,
            Err(CoreError::Probe(ProbeError::MemoryQueryFailed(_)))
        ));
    }
}
