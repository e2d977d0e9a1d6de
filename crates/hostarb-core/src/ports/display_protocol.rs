//! Display protocol port.
//!
//! How a display port maps to its web client port, and how an access URI
//! is built for a device, depends on the remote console protocol. The
//! services only see this trait.

use crate::domain::DisplayAttributes;

/// Protocol-specific rules for display devices.
pub trait DisplayProtocol: Send + Sync {
    /// Web client port paired with a display `port`.
    fn web_port(&self, port: u16) -> u16;

    /// Access URI for `device` reachable at `host`.
    ///
    /// `password` is the caller-supplied credential. Returns `None` when no
    /// URI can be built: the device has no port yet, or it is password
    /// protected and the credential is missing or wrong.
    fn web_uri(
        &self,
        device: &DisplayAttributes,
        host: &str,
        password: Option<&str>,
    ) -> Option<String>;
}

/// VNC consoles served through a noVNC web client.
#[derive(Debug, Clone, Copy, Default)]
pub struct VncWebProtocol;

impl DisplayProtocol for VncWebProtocol {
    /// Decrements the leading two decimal digits: 5900 -> 5800, 10000 -> 9000.
    /// Shorter ports are decremented as a whole (10 -> 9, 5 -> 4).
    fn web_port(&self, port: u16) -> u16 {
        let digits = port.to_string();
        let (head, tail) = digits.split_at(digits.len().min(2));
        let head: u16 = head.parse().unwrap_or(0);
        format!("{}{tail}", head.saturating_sub(1))
            .parse()
            .unwrap_or(port)
    }

    fn web_uri(
        &self,
        device: &DisplayAttributes,
        host: &str,
        password: Option<&str>,
    ) -> Option<String> {
        let port = device.port?;
        let mut uri = format!(
            "http://{host}:{}/vnc.html?autoconnect=1",
            self.web_port(port)
        );

        if device.password_configured() {
            let supplied = password?;
            if device.password.as_deref() != Some(supplied) {
                return None;
            }
            uri.push_str("&password=");
            uri.push_str(&urlencoding::encode(supplied));
        }

        Some(uri)
    }
}
