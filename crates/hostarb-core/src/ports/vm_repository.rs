//! VM repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Vm, VmId, VmStatus};

/// Query access to VM records and their live status.
///
/// Every call reflects the state at the time of the call; nothing is
/// cached between requests.
#[async_trait]
pub trait VmRepository: Send + Sync {
    /// List all configured VMs.
    async fn list(&self) -> Result<Vec<Vm>, RepositoryError>;

    /// Fetch the live run status of a VM.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the VM doesn't exist.
    async fn status(&self, id: VmId) -> Result<VmStatus, RepositoryError>;
}
