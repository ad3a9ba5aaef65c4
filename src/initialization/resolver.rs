//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for the DNS-only fallback check.
///
/// Uses the default upstream configuration with short timeouts and few
/// attempts so a dead name fails fast. `ndots` is 0 to stop search domains
/// being appended to the probed hostname.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = crate::config::DNS_ATTEMPTS;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
