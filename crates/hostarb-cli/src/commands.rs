//! Main commands enum.

use clap::Subcommand;
use hostarb_core::VmId;

/// Top-level commands.
///
/// `paths` needs no host access; everything else goes through the
/// bootstrapped arbiter.
#[derive(Subcommand)]
pub enum Commands {
    /// Show resolved data file locations
    Paths,

    #[command(flatten)]
    Query(QueryCommand),
}

/// Arbitration queries answered by the host arbiter.
#[derive(Subcommand)]
pub enum QueryCommand {
    /// Memory that may still be allocated to VMs
    AvailableMemory {
        /// Charge only memory VM processes already hold
        #[arg(long)]
        overcommit: bool,
    },

    /// Configured VM memory grouped by run state and autostart
    MemoryUsage,

    /// Suggest the next free display port and its web port
    PortWizard,

    /// List the display devices of a VM
    DisplayDevices {
        /// VM id
        vm: VmId,
    },

    /// Web console URIs for the display devices of a VM
    DisplayUris {
        /// VM id
        vm: VmId,
        /// Host to put in the URIs (defaults to the local address)
        #[arg(long)]
        host: Option<String>,
        /// Display credential, repeatable
        #[arg(long = "password", value_name = "DEVICE_ID=PASSWORD")]
        passwords: Vec<String>,
    },

    /// Host interfaces the NICs of a VM are attached to
    AttachedIfaces {
        /// VM id
        vm: VmId,
    },

    /// Generate a MAC address for a new NIC
    RandomMac,

    /// List supported display resolutions
    Resolutions,
}
