//! Paths command handler.

use anyhow::Result;
use serde::Serialize;

use crate::bootstrap::CliConfig;
use crate::presentation::{OutputFormat, print_json};

#[derive(Debug, Serialize)]
struct PathsReport<'a> {
    inventory: &'a std::path::Path,
    inventory_exists: bool,
    settings: &'a std::path::Path,
    settings_exists: bool,
}

/// Show where the inventory and settings are read from.
pub fn execute(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let report = PathsReport {
        inventory: &config.inventory_path,
        inventory_exists: config.inventory_path.exists(),
        settings: &config.settings_path,
        settings_exists: config.settings_path.exists(),
    };

    if format.is_json() {
        return print_json(&report);
    }

    println!(
        "Inventory: {}{}",
        report.inventory.display(),
        missing_marker(report.inventory_exists)
    );
    println!(
        "Settings:  {}{}",
        report.settings.display(),
        missing_marker(report.settings_exists)
    );
    Ok(())
}

const fn missing_marker(exists: bool) -> &'static str {
    if exists { "" } else { " (missing)" }
}
