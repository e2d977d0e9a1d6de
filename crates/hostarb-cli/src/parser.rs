//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;
use crate::presentation::OutputFormat;

/// Resource arbitration queries for a VM host.
#[derive(Parser)]
#[command(name = "hostarb")]
#[command(about = "Answer memory, display port and console access questions for a VM host")]
#[command(version)]
pub struct Cli {
    /// Inventory file describing VMs and their devices
    #[arg(long, global = true, env = "HOSTARB_INVENTORY")]
    pub inventory: Option<PathBuf>,

    /// Settings file
    #[arg(long, global = true, env = "HOSTARB_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub const fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
