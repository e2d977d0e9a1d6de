//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use hostarb_core::{CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inventory could not be read or parsed.
    #[error("Inventory error: {0}")]
    Inventory(String),

    /// Host probe failed.
    #[error("Host probe error: {0}")]
    Probe(String),

    /// No display port left to hand out.
    #[error("{0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Inventory(_) => 65,   // EX_DATAERR
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Probe(_) => 71,       // EX_OSERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Inventory(repo_err.to_string()),
            CoreError::Probe(probe_err) => Self::Probe(probe_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            err @ CoreError::PortsExhausted { .. } => Self::Unavailable(err.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}
