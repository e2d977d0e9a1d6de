//! Display device listing and web access URIs.

use std::net::Ipv6Addr;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{DeviceFilter, DeviceKind, DisplayCredentials, DisplayDeviceView, VmId};
use crate::ports::{CoreError, DeviceRepository, DisplayProtocol, LocalAddressResolver};

/// Wrap IPv6 literals in brackets for use as a URI host.
///
/// Scoped literals (`fe80::1%em0`) are bracketed with their zone kept.
/// Anything that does not parse as IPv6 (IPv4, hostnames, garbage) is
/// returned unchanged.
pub fn normalize_host(host: &str) -> String {
    let address = host.split_once('%').map_or(host, |(address, _zone)| address);
    if address.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]")
    } else {
        host.to_string()
    }
}

/// Resolves which display devices of a VM can be reached and how.
pub struct DisplayAccessResolver {
    devices: Arc<dyn DeviceRepository>,
    protocol: Arc<dyn DisplayProtocol>,
    address: Arc<dyn LocalAddressResolver>,
}

impl DisplayAccessResolver {
    pub fn new(
        devices: Arc<dyn DeviceRepository>,
        protocol: Arc<dyn DisplayProtocol>,
        address: Arc<dyn LocalAddressResolver>,
    ) -> Self {
        Self {
            devices,
            protocol,
            address,
        }
    }

    /// Display devices of `vm`, with passwords replaced by a
    /// `password_configured` flag.
    pub async fn display_devices(&self, vm: VmId) -> Result<Vec<DisplayDeviceView>, CoreError> {
        let devices = self
            .devices
            .list(&DeviceFilter::of_kind(DeviceKind::Display).for_vm(vm))
            .await?;

        Ok(devices
            .iter()
            .filter_map(|d| d.as_display().map(|attrs| DisplayDeviceView::new(d, attrs)))
            .collect())
    }

    /// Web URIs for the web-enabled display devices of `vm`.
    ///
    /// An empty `host` is replaced by the local interface address.
    /// Password-protected devices without a matching entry in `credentials`
    /// are left out; the result may be partial or empty.
    pub async fn web_uris(
        &self,
        vm: VmId,
        host: &str,
        credentials: &DisplayCredentials,
    ) -> Result<Vec<String>, CoreError> {
        let host = if host.is_empty() {
            self.address.local_address()?
        } else {
            host.to_string()
        };
        let host = normalize_host(&host);

        let devices = self
            .devices
            .list(&DeviceFilter::of_kind(DeviceKind::Display).for_vm(vm))
            .await?;

        let mut uris = Vec::new();
        for device in &devices {
            let Some(attrs) = device.as_display() else {
                continue;
            };
            if !attrs.web {
                continue;
            }

            let password = if attrs.password_configured() {
                let Some(password) = credentials.get(device.id) else {
                    debug!(device_id = device.id, "No credential for protected display, omitting");
                    continue;
                };
                Some(password)
            } else {
                None
            };

            match self.protocol.web_uri(attrs, &host, password) {
                Some(uri) => uris.push(uri),
                None => debug!(device_id = device.id, "Display URI not constructible, omitting"),
            }
        }

        Ok(uris)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Device, DisplayAttributes};
    use crate::ports::{MockLocalAddressResolver, StaticAddressResolver, VncWebProtocol};
    use crate::test_support::StubDevices;

    fn resolver(devices: Vec<Device>) -> DisplayAccessResolver {
        DisplayAccessResolver::new(
            Arc::new(StubDevices::new(devices)),
            Arc::new(VncWebProtocol),
            Arc::new(StaticAddressResolver::new("192.168.0.10")),
        )
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("::1"), "[::1]");
        assert_eq!(normalize_host("fe80::1:2"), "[fe80::1:2]");
        assert_eq!(normalize_host("192.168.1.5"), "192.168.1.5");
        assert_eq!(normalize_host("nas.local"), "nas.local");
        assert_eq!(normalize_host("[::1]"), "[::1]");
    }

    #[test]
    fn test_normalize_scoped_host() {
        assert_eq!(normalize_host("fe80::1%eth0"), "[fe80::1%eth0]");
        assert_eq!(normalize_host("fe80::1%2"), "[fe80::1%2]");
        assert_eq!(normalize_host("nas%eth0"), "nas%eth0");
        assert_eq!(normalize_host("10.0.0.1%eth0"), "10.0.0.1%eth0");
    }

    #[tokio::test]
    async fn test_protected_device_needs_credential() {
        let devices = vec![Device::display(
            7,
            1,
            DisplayAttributes::with_port(5900).password("hunter2"),
        )];
        let resolver = resolver(devices);

        let without = resolver
            .web_uris(1, "10.0.0.1", &DisplayCredentials::new())
            .await
            .unwrap();
        assert!(without.is_empty());

        let creds: DisplayCredentials = [(7, "hunter2")].into_iter().collect();
        let with = resolver.web_uris(1, "10.0.0.1", &creds).await.unwrap();
        assert_eq!(with.len(), 1);
        assert!(with[0].starts_with("http://10.0.0.1:5800/"));
    }

    #[tokio::test]
    async fn test_wrong_credential_is_omitted() {
        let devices = vec![Device::display(
            7,
            1,
            DisplayAttributes::with_port(5900).password("hunter2"),
        )];
        let creds: DisplayCredentials = [(7, "guess")].into_iter().collect();
        let uris = resolver(devices).web_uris(1, "h", &creds).await.unwrap();
        assert!(uris.is_empty());
    }

    #[tokio::test]
    async fn test_partial_results_keep_order() {
        let devices = vec![
            Device::display(1, 1, DisplayAttributes::with_port(5901)),
            Device::display(2, 1, DisplayAttributes::with_port(5902).password("pw")),
            Device::display(3, 1, DisplayAttributes::with_port(5903).web(false)),
            Device::display(4, 1, DisplayAttributes::with_port(5904)),
            Device::display(5, 2, DisplayAttributes::with_port(5905)),
        ];
        let uris = resolver(devices)
            .web_uris(1, "h", &DisplayCredentials::new())
            .await
            .unwrap();

        assert_eq!(
            uris,
            vec![
                "http://h:5801/vnc.html?autoconnect=1".to_string(),
                "http://h:5804/vnc.html?autoconnect=1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_ipv6_host_is_bracketed() {
        let devices = vec![Device::display(1, 1, DisplayAttributes::with_port(5900))];
        let uris = resolver(devices)
            .web_uris(1, "::1", &DisplayCredentials::new())
            .await
            .unwrap();
        assert_eq!(uris, vec!["http://[::1]:5800/vnc.html?autoconnect=1".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_host_uses_resolver() {
        let mut address = MockLocalAddressResolver::new();
        address
            .expect_local_address()
            .times(1)
            .returning(|| Ok("fd00::5".to_string()));

        let resolver = DisplayAccessResolver::new(
            Arc::new(StubDevices::new(vec![Device::display(
                1,
                1,
                DisplayAttributes::with_port(5900),
            )])),
            Arc::new(VncWebProtocol),
            Arc::new(address),
        );

        let uris = resolver
            .web_uris(1, "", &DisplayCredentials::new())
            .await
            .unwrap();
        assert_eq!(uris, vec!["http://[fd00::5]:5800/vnc.html?autoconnect=1".to_string()]);
    }

    #[tokio::test]
    async fn test_explicit_host_skips_resolver() {
        let mut address = MockLocalAddressResolver::new();
        address.expect_local_address().never();

        let resolver = DisplayAccessResolver::new(
            Arc::new(StubDevices::new(vec![])),
            Arc::new(VncWebProtocol),
            Arc::new(address),
        );
        let uris = resolver
            .web_uris(1, "10.0.0.1", &DisplayCredentials::new())
            .await
            .unwrap();
        assert!(uris.is_empty());
    }

    #[tokio::test]
    async fn test_display_devices_flags_password() {
        let devices = vec![
            Device::display(1, 1, DisplayAttributes::with_port(5901).password("pw")),
            Device::display(2, 1, DisplayAttributes::with_port(5902)),
            Device::display(3, 2, DisplayAttributes::with_port(5903)),
        ];
        let views = resolver(devices).display_devices(1).await.unwrap();

        assert_eq!(views.len(), 2);
        assert!(views[0].password_configured);
        assert!(!views[1].password_configured);
    }
}
