//! Memory availability and usage handlers.

use std::fmt::Write as _;

use anyhow::Result;
use hostarb_core::MemoryUsage;
use serde::Serialize;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{OutputFormat, format_bytes, print_json};

#[derive(Debug, Serialize)]
struct AvailableMemoryReport {
    overcommit: bool,
    available_bytes: u64,
}

/// Execute the available-memory command.
pub async fn available(ctx: &CliContext, overcommit: bool, format: OutputFormat) -> Result<()> {
    let available_bytes = ctx
        .arbiter()
        .memory()
        .available_memory(overcommit)
        .await
        .map_err(CliError::from)?;

    if format.is_json() {
        return print_json(&AvailableMemoryReport {
            overcommit,
            available_bytes,
        });
    }

    println!(
        "Available for VMs: {} ({available_bytes} bytes){}",
        format_bytes(available_bytes),
        if overcommit { " [overcommit]" } else { "" }
    );
    Ok(())
}

/// Execute the memory-usage command.
pub async fn usage(ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let usage = ctx
        .arbiter()
        .memory_usage()
        .memory_in_use()
        .await
        .map_err(CliError::from)?;

    if format.is_json() {
        return print_json(&usage);
    }

    print!("{}", usage_table(&usage));
    Ok(())
}

fn usage_table(usage: &MemoryUsage) -> String {
    let rows = [
        ("RNP", "running, no autostart", usage.rnp),
        ("PRD", "autostart, not running", usage.prd),
        ("RPRD", "running with autostart", usage.rprd),
    ];
    let mut out = String::new();
    for (bucket, meaning, bytes) in rows {
        let _ = writeln!(out, "{bucket:<5} {meaning:<24} {:>12}", format_bytes(bytes));
    }
    let _ = writeln!(out, "{:<30} {:>12}", "total", format_bytes(usage.total()));
    out
}
