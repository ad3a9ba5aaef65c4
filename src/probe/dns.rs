//! DNS-only fallback check.
//!
//! When no protocol attempt produced an HTTP response, resolving the hostname
//! is the last weak signal left: a name that resolves points at an origin that
//! exists but refuses anonymous clients, one that does not is simply gone.

use std::net::IpAddr;

use anyhow::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

/// Resolves hostnames to addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolves `host` (no port) to at least one address.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails or yields no addresses.
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>>;
}

#[async_trait]
impl HostResolver for TokioAsyncResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }
        let response = self.lookup_ip(host).await.map_err(Error::new)?;
        let addresses: Vec<IpAddr> = response.iter().collect();
        if addresses.is_empty() {
            return Err(Error::msg("No IP addresses found"));
        }
        Ok(addresses)
    }
}
