//! CLI bootstrap - the composition root.
//!
//! The only place where runtime adapters are instantiated:
//! - JSON inventory (VMs and devices)
//! - Host memory probe and process inspector
//! - Local address resolver, unless settings pin a display host
//!
//! Command handlers receive the composed `HostArbiter` through `CliContext`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use hostarb_core::ports::LocalAddressResolver;
use hostarb_core::{
    CoreError, HostArbiter, HostPorts, Settings, StaticAddressResolver, VncWebProtocol,
    inventory_path, load_settings, settings_path,
};
use hostarb_runtime::{
    JsonInventory, SysinfoMemoryProbe, UdpLocalAddressResolver, default_process_inspector,
};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// VM/device inventory file.
    pub inventory_path: PathBuf,
    /// Settings file; a missing file means defaults.
    pub settings_path: PathBuf,
}

impl CliConfig {
    /// Default paths, replaced by whichever overrides are given.
    ///
    /// The data root is only resolved for paths that are not overridden.
    pub fn with_overrides(
        inventory: Option<PathBuf>,
        settings: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            inventory_path: match inventory {
                Some(path) => path,
                None => inventory_path()?,
            },
            settings_path: match settings {
                Some(path) => path,
                None => settings_path()?,
            },
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The arbitration facade.
    pub arbiter: HostArbiter,
    /// Settings the arbiter was built with.
    pub settings: Settings,
    /// Resolved file locations.
    pub config: CliConfig,
}

impl CliContext {
    /// Access the arbiter.
    pub const fn arbiter(&self) -> &HostArbiter {
        &self.arbiter
    }
}

/// Bootstrap the CLI application.
///
/// 1. Loads and validates settings
/// 2. Opens the inventory
/// 3. Creates the host probes
/// 4. Assembles the `HostArbiter`
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let settings = load_settings(&config.settings_path)
        .map_err(|e| CliError::from(CoreError::from(e)))?;

    let inventory = Arc::new(JsonInventory::new(&config.inventory_path));
    let processes =
        default_process_inspector().map_err(|e| CliError::from(CoreError::from(e)))?;

    let address: Arc<dyn LocalAddressResolver> = match &settings.default_display_host {
        Some(host) => Arc::new(StaticAddressResolver::new(host.clone())),
        None => Arc::new(UdpLocalAddressResolver::new()),
    };

    let ports = HostPorts {
        vms: inventory.clone(),
        devices: inventory,
        processes,
        memory: Arc::new(SysinfoMemoryProbe::new()),
        display: Arc::new(VncWebProtocol),
        address,
    };

    debug!(
        inventory = %config.inventory_path.display(),
        settings = %config.settings_path.display(),
        "Bootstrapped host arbiter"
    );

    Ok(CliContext {
        arbiter: HostArbiter::new(ports, &settings),
        settings,
        config,
    })
}
