//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod tables;

use anyhow::Result;
use serde::Serialize;

pub use tables::{display_devices_table, format_bytes, format_optional};

/// How handlers render their answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
