//! Command handlers.
//!
//! Each handler calls one arbiter service through `CliContext` and prints
//! the result in the requested `OutputFormat`.

pub mod display;
pub mod memory;
pub mod nic;
pub mod paths;
pub mod ports;
