//! Local interface address resolution.

use super::ProbeError;

/// Resolves the host address used in display URIs when a caller supplies none.
#[cfg_attr(test, mockall::automock)]
pub trait LocalAddressResolver: Send + Sync {
    fn local_address(&self) -> Result<String, ProbeError>;
}

/// Resolver that always answers with a configured address.
#[derive(Debug, Clone)]
pub struct StaticAddressResolver {
    address: String,
}

impl StaticAddressResolver {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl LocalAddressResolver for StaticAddressResolver {
    fn local_address(&self) -> Result<String, ProbeError> {
        Ok(self.address.clone())
    }
}
