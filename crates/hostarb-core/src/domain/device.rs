//! VM device records.
//!
//! Devices are read-only inputs to the arbitration services. Only display
//! and NIC devices carry fields that anything here reads.

use serde::{Deserialize, Serialize};

use super::vm::VmId;

/// Identifier of a device record.
pub type DeviceId = i64;

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_resolution() -> String {
    "1024x768".to_string()
}

const fn default_true() -> bool {
    true
}

/// Attributes of a remote console (display) device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    /// Display server port, `None` until one has been assigned.
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Whether the console is reachable through the web client.
    #[serde(default = "default_true")]
    pub web: bool,
    #[serde(default = "default_resolution")]
    pub resolution: String,
    /// Whether the VM waits for a client to attach before booting.
    #[serde(default)]
    pub wait: bool,
}

impl DisplayAttributes {
    /// A web-enabled display bound to `port` without a password.
    pub fn with_port(port: u16) -> Self {
        Self {
            port: Some(port),
            bind: default_bind(),
            password: None,
            web: true,
            resolution: default_resolution(),
            wait: false,
        }
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub const fn web(mut self, web: bool) -> Self {
        self.web = web;
        self
    }

    /// An empty password counts as no password.
    pub fn password_configured(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Attributes of a network interface device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicAttributes {
    /// Host interface the NIC is bridged onto.
    #[serde(default)]
    pub nic_attach: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

/// Device kind discriminator used by queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceKind {
    Display,
    Nic,
}

/// Kind-specific device attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dtype", rename_all = "UPPERCASE")]
pub enum DeviceAttributes {
    Display(DisplayAttributes),
    Nic(NicAttributes),
}

/// A device attached to a VM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// Owning VM.
    pub vm: VmId,
    pub attributes: DeviceAttributes,
}

impl Device {
    pub const fn display(id: DeviceId, vm: VmId, attributes: DisplayAttributes) -> Self {
        Self {
            id,
            vm,
            attributes: DeviceAttributes::Display(attributes),
        }
    }

    pub const fn nic(id: DeviceId, vm: VmId, attributes: NicAttributes) -> Self {
        Self {
            id,
            vm,
            attributes: DeviceAttributes::Nic(attributes),
        }
    }

    pub const fn kind(&self) -> DeviceKind {
        match self.attributes {
            DeviceAttributes::Display(_) => DeviceKind::Display,
            DeviceAttributes::Nic(_) => DeviceKind::Nic,
        }
    }

    pub const fn as_display(&self) -> Option<&DisplayAttributes> {
        match &self.attributes {
            DeviceAttributes::Display(attrs) => Some(attrs),
            DeviceAttributes::Nic(_) => None,
        }
    }

    pub const fn as_nic(&self) -> Option<&NicAttributes> {
        match &self.attributes {
            DeviceAttributes::Nic(attrs) => Some(attrs),
            DeviceAttributes::Display(_) => None,
        }
    }
}

/// Equality predicates for device queries. `None` matches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub vm: Option<VmId>,
    pub kind: Option<DeviceKind>,
}

impl DeviceFilter {
    /// Matches every device.
    pub const fn all() -> Self {
        Self {
            vm: None,
            kind: None,
        }
    }

    /// Matches every device of `kind`, across all VMs.
    pub const fn of_kind(kind: DeviceKind) -> Self {
        Self {
            vm: None,
            kind: Some(kind),
        }
    }

    #[must_use]
    pub const fn for_vm(mut self, vm: VmId) -> Self {
        self.vm = Some(vm);
        self
    }

    pub fn matches(&self, device: &Device) -> bool {
        self.vm.is_none_or(|vm| device.vm == vm) && self.kind.is_none_or(|k| device.kind() == k)
    }
}

/// A display device as reported to callers.
///
/// The configured password is never echoed; `password_configured` tells the
/// caller whether one has to be supplied to obtain a web URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDeviceView {
    pub id: DeviceId,
    pub vm: VmId,
    pub port: Option<u16>,
    pub bind: String,
    pub web: bool,
    pub resolution: String,
    pub wait: bool,
    pub password_configured: bool,
}

impl DisplayDeviceView {
    pub fn new(device: &Device, attrs: &DisplayAttributes) -> Self {
        Self {
            id: device.id,
            vm: device.vm,
            port: attrs.port,
            bind: attrs.bind.clone(),
            web: attrs.web,
            resolution: attrs.resolution.clone(),
            wait: attrs.wait,
            password_configured: attrs.password_configured(),
        }
    }
}
