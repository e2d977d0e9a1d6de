//! # hostarb-cli
//!
//! Command-line adapter over the `hostarb-core` arbitration services.
//! `bootstrap` wires the runtime adapters into a `HostArbiter`; each
//! subcommand is a thin handler that calls one service and prints the
//! answer as text or JSON.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, QueryCommand};
pub use error::CliError;
pub use parser::Cli;
pub use presentation::OutputFormat;
