//! JSON-file inventory of VMs and their devices.
//!
//! The file is re-read on every query so answers always reflect what is on
//! disk at call time:
//!
//! ```json
//! {
//!   "vms": [
//!     { "id": 1, "name": "web", "memory_mb": 2048, "autostart": true,
//!       "status": { "state": "RUNNING", "pid": 4242 } }
//!   ],
//!   "devices": [
//!     { "id": 10, "vm": 1, "attributes": { "dtype": "DISPLAY", "port": 5900 } }
//!   ]
//! }
//! ```

mod error;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostarb_core::domain::{Device, DeviceFilter, Vm, VmId, VmStatus};
use hostarb_core::ports::{DeviceRepository, RepositoryError, VmRepository};
use serde::Deserialize;
use tracing::debug;

pub use error::InventoryError;

#[derive(Debug, Deserialize)]
struct VmEntry {
    #[serde(flatten)]
    vm: Vm,
    #[serde(default)]
    status: VmStatus,
}

#[derive(Debug, Default, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    vms: Vec<VmEntry>,
    #[serde(default)]
    devices: Vec<Device>,
}

/// Read-only inventory backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonInventory {
    path: PathBuf,
}

impl JsonInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<InventoryFile, InventoryError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| InventoryError::Read {
                    path: self.path.clone(),
                    source,
                })?;
        let file: InventoryFile =
            serde_json::from_str(&content).map_err(|source| InventoryError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %self.path.display(),
            vms = file.vms.len(),
            devices = file.devices.len(),
            "Loaded inventory"
        );
        Ok(file)
    }
}

#[async_trait]
impl VmRepository for JsonInventory {
    async fn list(&self) -> Result<Vec<Vm>, RepositoryError> {
        let file = self.load().await?;
        Ok(file.vms.into_iter().map(|entry| entry.vm).collect())
    }

    async fn status(&self, id: VmId) -> Result<VmStatus, RepositoryError> {
        let file = self.load().await?;
        file.vms
            .iter()
            .find(|entry| entry.vm.id == id)
            .map(|entry| entry.status)
            .ok_or_else(|| RepositoryError::NotFound(format!("vm id={id}")))
    }
}

#[async_trait]
impl DeviceRepository for JsonInventory {
    async fn list(&self, filter: &DeviceFilter) -> Result<Vec<Device>, RepositoryError> {
        let file = self.load().await?;
        Ok(file
            .devices
            .into_iter()
            .filter(|device| filter.matches(device))
            .collect())
    }
}
