//! NIC handlers.

use anyhow::Result;
use hostarb_core::VmId;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{OutputFormat, print_json};

/// Execute the attached-ifaces command.
pub async fn attached(ctx: &CliContext, vm: VmId, format: OutputFormat) -> Result<()> {
    let ifaces = ctx
        .arbiter()
        .nics()
        .attached_interfaces(vm)
        .await
        .map_err(CliError::from)?;

    if format.is_json() {
        return print_json(&ifaces);
    }

    match ifaces {
        Some(ifaces) => ifaces.iter().for_each(|iface| println!("{iface}")),
        None => println!("VM {vm} has no NIC attached to a host interface."),
    }
    Ok(())
}

/// Execute the random-mac command.
pub fn random_mac(ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let mac = ctx.arbiter().nics().random_mac();
    if format.is_json() {
        return print_json(&mac);
    }
    println!("{mac}");
    Ok(())
}
