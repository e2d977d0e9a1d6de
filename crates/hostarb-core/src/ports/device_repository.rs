//! Device repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Device, DeviceFilter};

/// Query access to VM device records.
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// List devices matching `filter`, in a stable enumeration order.
    async fn list(&self, filter: &DeviceFilter) -> Result<Vec<Device>, RepositoryError>;
}
