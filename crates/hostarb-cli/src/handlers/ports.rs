//! Display port wizard handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{OutputFormat, print_json};

/// Execute the port-wizard command.
///
/// The suggestion is not reserved; a device created later may still take it.
pub async fn execute(ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let pair = ctx
        .arbiter()
        .display_ports()
        .next_port_pair()
        .await
        .map_err(CliError::from)?;

    if format.is_json() {
        return print_json(&pair);
    }

    println!("Display port: {}", pair.port);
    println!("Web port:     {}", pair.web);
    Ok(())
}
