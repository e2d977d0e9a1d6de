//! Process memory inspection port.

use async_trait::async_trait;

use super::ProcessLookupError;
use crate::domain::ResidentMemory;

/// Reads the resident memory breakdown of a live process.
#[async_trait]
pub trait ProcessInspector: Send + Sync {
    /// Memory counters for `pid`.
    ///
    /// Returns `Err(ProcessLookupError::NotFound)` when the process no
    /// longer exists.
    async fn resident_memory(&self, pid: u32) -> Result<ResidentMemory, ProcessLookupError>;
}
