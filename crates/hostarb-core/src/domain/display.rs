//! Display port pairs, supplied credentials and resolution choices.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::device::DeviceId;

/// Resolutions a display device may be configured with.
pub const RESOLUTIONS: [&str; 10] = [
    "1920x1200",
    "1920x1080",
    "1600x1200",
    "1600x900",
    "1400x1050",
    "1280x1024",
    "1280x720",
    "1024x768",
    "800x600",
    "640x480",
];

/// A display server port and the web client port paired with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPair {
    pub port: u16,
    pub web: u16,
}

/// Passwords supplied by a caller for password-protected display devices.
///
/// A device without an entry has no credential. There is no fallback or
/// default password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayCredentials {
    passwords: HashMap<DeviceId, String>,
}

impl DisplayCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: DeviceId, password: impl Into<String>) {
        self.passwords.insert(device, password.into());
    }

    pub fn get(&self, device: DeviceId) -> Option<&str> {
        self.passwords.get(&device).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(DeviceId, S)> for DisplayCredentials {
    fn from_iter<I: IntoIterator<Item = (DeviceId, S)>>(iter: I) -> Self {
        Self {
            passwords: iter.into_iter().map(|(id, pw)| (id, pw.into())).collect(),
        }
    }
}
