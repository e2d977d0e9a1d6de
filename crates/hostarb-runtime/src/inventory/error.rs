use std::path::PathBuf;

use hostarb_core::ports::RepositoryError;
use thiserror::Error;

/// Failures reading the inventory file.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to read inventory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid inventory {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<InventoryError> for RepositoryError {
    fn from(err: InventoryError) -> Self {
        match &err {
            InventoryError::Read { .. } => Self::Storage(err.to_string()),
            InventoryError::Parse { .. } => Self::Serialization(err.to_string()),
        }
    }
}
