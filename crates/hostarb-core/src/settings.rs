//! Settings domain types, validation and loading.
//!
//! Settings tune the arbitration services. Every field is optional so a
//! partial `settings.json` falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Share of the probe's available memory treated as free.
pub const DEFAULT_FREE_MEMORY_PERCENT: u8 = 90;

/// First port considered for display devices.
pub const DEFAULT_DISPLAY_PORT_START: u16 = 5900;

/// End (exclusive) of the display port range.
pub const DEFAULT_DISPLAY_PORT_END: u16 = 65535;

/// Default web console ports that are always treated as taken.
pub const DEFAULT_RESERVED_WEB_PORTS: [u16; 2] = [6000, 6100];

/// Arbitration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Percentage (1-100) of available memory considered safe to hand out.
    pub free_memory_percent: Option<u8>,

    /// First port of the display allocation range.
    pub display_port_start: Option<u16>,

    /// End of the display allocation range (exclusive).
    pub display_port_end: Option<u16>,

    /// Ports never handed to a display device.
    pub reserved_web_ports: Option<Vec<u16>>,

    /// Host used in display URIs when the caller supplies none.
    /// Unset means the local interface address is detected.
    pub default_display_host: Option<String>,
}

impl Settings {
    /// Create settings with explicit defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            free_memory_percent: Some(DEFAULT_FREE_MEMORY_PERCENT),
            display_port_start: Some(DEFAULT_DISPLAY_PORT_START),
            display_port_end: Some(DEFAULT_DISPLAY_PORT_END),
            reserved_web_ports: Some(DEFAULT_RESERVED_WEB_PORTS.to_vec()),
            default_display_host: None,
        }
    }

    #[must_use]
    pub fn effective_free_memory_percent(&self) -> u8 {
        self.free_memory_percent
            .unwrap_or(DEFAULT_FREE_MEMORY_PERCENT)
    }

    #[must_use]
    pub fn effective_display_port_range(&self) -> std::ops::Range<u16> {
        let start = self.display_port_start.unwrap_or(DEFAULT_DISPLAY_PORT_START);
        let end = self.display_port_end.unwrap_or(DEFAULT_DISPLAY_PORT_END);
        start..end
    }

    #[must_use]
    pub fn effective_reserved_web_ports(&self) -> Vec<u16> {
        self.reserved_web_ports
            .clone()
            .unwrap_or_else(|| DEFAULT_RESERVED_WEB_PORTS.to_vec())
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Free memory percent must be between 1 and 100, got {0}")]
    InvalidFreeMemoryPercent(u8),

    #[error("Display port range {start}-{end} is empty")]
    EmptyPortRange { start: u16, end: u16 },

    #[error("Port should be >= 1024 (privileged ports require root), got {0}")]
    InvalidPort(u16),

    #[error("Default display host cannot be empty")]
    EmptyDisplayHost,

    #[error("Failed to read settings file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(percent) = settings.free_memory_percent {
        if !(1..=100).contains(&percent) {
            return Err(SettingsError::InvalidFreeMemoryPercent(percent));
        }
    }

    let range = settings.effective_display_port_range();
    if range.start < 1024 {
        return Err(SettingsError::InvalidPort(range.start));
    }
    if range.is_empty() {
        return Err(SettingsError::EmptyPortRange {
            start: range.start,
            end: range.end,
        });
    }

    if settings
        .default_display_host
        .as_ref()
        .is_some_and(|h| h.trim().is_empty())
    {
        return Err(SettingsError::EmptyDisplayHost);
    }

    Ok(())
}

/// Load and validate settings from a JSON file.
///
/// A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let unreadable = |reason: String| SettingsError::Unreadable {
        path: path.display().to_string(),
        reason,
    };

    let settings = match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            Settings::default()
        }
        Err(e) => return Err(unreadable(e.to_string())),
    };

    validate_settings(&settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.effective_free_memory_percent(), 90);
        assert_eq!(settings.effective_display_port_range(), 5900..65535);
        assert_eq!(settings.effective_reserved_web_ports(), vec![6000, 6100]);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_empty_settings_fall_back() {
        let settings = Settings::default();
        assert_eq!(settings.effective_free_memory_percent(), 90);
        assert_eq!(settings.effective_display_port_range(), 5900..65535);
    }

    #[test]
    fn test_validate_percent() {
        let settings = Settings {
            free_memory_percent: Some(0),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidFreeMemoryPercent(0))
        ));
    }

    #[test]
    fn test_validate_port_range() {
        let inverted = Settings {
            display_port_start: Some(7000),
            display_port_end: Some(6000),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&inverted),
            Err(SettingsError::EmptyPortRange { .. })
        ));

        let privileged = Settings {
            display_port_start: Some(80),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&privileged),
            Err(SettingsError::InvalidPort(80))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"free_memory_percent": 80, "default_display_host": "nas.local"}}"#)
            .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.effective_free_memory_percent(), 80);
        assert_eq!(settings.default_display_host.as_deref(), Some("nas.local"));
        assert_eq!(settings.effective_reserved_web_ports(), vec![6000, 6100]);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"free_memory_percent": 150}"#).unwrap();

        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::InvalidFreeMemoryPercent(150))
        ));
    }
}
