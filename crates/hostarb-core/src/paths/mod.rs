//! Path utilities for hostarb data files.
//!
//! Resolution order for the data root:
//! 1. `HOSTARB_DATA_DIR` environment variable (highest priority)
//! 2. System data directory (e.g., `~/.local/share/hostarb`)
//!
//! Nothing here creates directories or touches file contents; adapters
//! decide what to do with a missing file.

mod error;

use std::env;
use std::path::PathBuf;

pub use error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "HOSTARB_DATA_DIR";

const SETTINGS_FILE: &str = "settings.json";
const INVENTORY_FILE: &str = "inventory.json";

/// Root directory for hostarb data files.
pub fn data_root() -> Result<PathBuf, PathError> {
    resolve_data_root(env::var(DATA_DIR_ENV).ok(), dirs::data_dir())
}

/// Location of the settings file.
pub fn settings_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(SETTINGS_FILE))
}

/// Location of the VM/device inventory snapshot.
pub fn inventory_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(INVENTORY_FILE))
}

fn resolve_data_root(
    override_dir: Option<String>,
    system_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir {
        if dir.trim().is_empty() {
            return Err(PathError::EmptyPath);
        }
        return Ok(PathBuf::from(dir));
    }

    system_dir
        .map(|dir| dir.join("hostarb"))
        .ok_or(PathError::NoDataDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let root = resolve_data_root(
            Some("/srv/hostarb".to_string()),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(root, PathBuf::from("/srv/hostarb"));
    }

    #[test]
    fn test_system_dir_fallback() {
        let root = resolve_data_root(None, Some(PathBuf::from("/home/u/.local/share"))).unwrap();
        assert_eq!(root, PathBuf::from("/home/u/.local/share/hostarb"));
    }

    #[test]
    fn test_empty_override_rejected() {
        assert!(matches!(
            resolve_data_root(Some("  ".to_string()), None),
            Err(PathError::EmptyPath)
        ));
        assert!(matches!(
            resolve_data_root(None, None),
            Err(PathError::NoDataDir)
        ));
    }
}
