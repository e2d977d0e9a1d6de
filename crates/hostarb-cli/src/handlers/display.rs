//! Display device handlers: listing, web URIs and resolutions.

use anyhow::Result;
use hostarb_core::{DeviceId, DisplayCredentials, VmId};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{OutputFormat, display_devices_table, print_json};

/// Parse repeated `DEVICE_ID=PASSWORD` arguments.
///
/// Empty passwords are rejected: they could never match a protected device.
pub fn parse_credentials(args: &[String]) -> Result<DisplayCredentials, CliError> {
    let mut credentials = DisplayCredentials::new();
    for arg in args {
        let Some((id, password)) = arg.split_once('=') else {
            return Err(CliError::Arguments(format!(
                "expected DEVICE_ID=PASSWORD, got '{arg}'"
            )));
        };
        let id: DeviceId = id
            .trim()
            .parse()
            .map_err(|_| CliError::Arguments(format!("invalid device id '{id}'")))?;
        if password.is_empty() {
            return Err(CliError::Arguments(format!(
                "empty password for device {id}"
            )));
        }
        credentials.insert(id, password);
    }
    Ok(credentials)
}

/// Execute the display-devices command.
pub async fn devices(ctx: &CliContext, vm: VmId, format: OutputFormat) -> Result<()> {
    let views = ctx
        .arbiter()
        .display_access()
        .display_devices(vm)
        .await
        .map_err(CliError::from)?;

    if format.is_json() {
        return print_json(&views);
    }

    if views.is_empty() {
        println!("VM {vm} has no display devices.");
        return Ok(());
    }
    print!("{}", display_devices_table(&views));
    Ok(())
}

/// Execute the display-uris command.
pub async fn uris(
    ctx: &CliContext,
    vm: VmId,
    host: Option<&str>,
    passwords: &[String],
    format: OutputFormat,
) -> Result<()> {
    let credentials = parse_credentials(passwords)?;
    let uris = ctx
        .arbiter()
        .display_access()
        .web_uris(vm, host.unwrap_or_default(), &credentials)
        .await
        .map_err(CliError::from)?;

    if format.is_json() {
        return print_json(&uris);
    }

    uris.iter().for_each(|uri| println!("{uri}"));
    Ok(())
}

/// Execute the resolutions command.
pub fn resolutions(ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let choices = ctx.arbiter().resolution_choices();
    if format.is_json() {
        return print_json(choices);
    }
    choices.iter().for_each(|r| println!("{r}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_credentials() {
        let creds = parse_credentials(&args(&["7=secret", "8=a=b"])).unwrap();
        assert_eq!(creds.len(), 2);
        assert_eq!(creds.get(7), Some("secret"));
        assert_eq!(creds.get(8), Some("a=b"));
    }

    #[test]
    fn test_parse_credentials_rejects_malformed() {
        for bad in [&["secret"][..], &["x=secret"], &["7="]] {
            let err = parse_credentials(&args(bad)).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?}");
        }
    }

    #[test]
    fn test_no_credentials() {
        assert!(parse_credentials(&[]).unwrap().is_empty());
    }
}
