//! NIC helpers: attached host interfaces and MAC generation.

use std::sync::Arc;

use crate::domain::{DeviceFilter, DeviceKind, VmId, nic};
use crate::ports::{CoreError, DeviceRepository};

/// Queries over a VM's network interface devices.
pub struct NicService {
    devices: Arc<dyn DeviceRepository>,
}

impl NicService {
    pub fn new(devices: Arc<dyn DeviceRepository>) -> Self {
        Self { devices }
    }

    /// Host interfaces the NICs of `vm` are attached to.
    ///
    /// Returns `None` when no NIC of the VM is attached to anything.
    pub async fn attached_interfaces(&self, vm: VmId) -> Result<Option<Vec<String>>, CoreError> {
        let nics = self
            .devices
            .list(&DeviceFilter::of_kind(DeviceKind::Nic).for_vm(vm))
            .await?;

        let ifaces: Vec<String> = nics
            .iter()
            .filter_map(|d| d.as_nic())
            .filter_map(|attrs| attrs.nic_attach.clone())
            .filter(|iface| !iface.is_empty())
            .collect();

        Ok((!ifaces.is_empty()).then_some(ifaces))
    }

    /// A fresh MAC address for a new NIC.
    pub fn random_mac(&self) -> String {
        nic::random_mac(&mut rand::thread_rng())
    }
}
