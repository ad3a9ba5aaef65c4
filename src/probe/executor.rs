//! Probe executor.
//!
//! Runs the configured protocols in order (HTTPS then HTTP by default), each
//! through every fetch strategy, and stops at the first attempt that yields an
//! HTTP response. Attempts are sequential: a fallback only means something
//! once the previous attempt is known to have failed.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS, HARD_TIMEOUT_GRACE};
use crate::domain::Target;
use crate::error_handling::{InitializationError, TransportFailureKind};
use crate::initialization::init_resolver;
use crate::probe::config::ProbeConfig;
use crate::probe::dns::HostResolver;
use crate::probe::evidence::{DnsResolution, Evidence, TransportFailure};
use crate::probe::strategy::{FetchStrategy, ReqwestStrategy};

/// Gathers evidence about a [`Target`].
pub struct Prober {
    config: ProbeConfig,
    strategies: Vec<Arc<dyn FetchStrategy>>,
    resolver: Option<Arc<dyn HostResolver>>,
}

impl Prober {
    /// A prober using reqwest for fetching and hickory for the DNS check.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ProbeConfig) -> Result<Self, InitializationError> {
        let strategy: Arc<dyn FetchStrategy> = Arc::new(ReqwestStrategy::new(&config)?);
        let resolver: Arc<dyn HostResolver> = init_resolver();
        Ok(Self::with_parts(config, vec![strategy], Some(resolver)))
    }

    /// A prober with explicit strategies and resolver.
    ///
    /// Without a resolver the DNS-only check is skipped even when
    /// `config.dns_fallback` is set.
    pub fn with_parts(
        config: ProbeConfig,
        strategies: Vec<Arc<dyn FetchStrategy>>,
        resolver: Option<Arc<dyn HostResolver>>,
    ) -> Self {
        Self {
            config,
            strategies,
            resolver,
        }
    }

    /// The configuration probes are issued with.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probes `target` and returns the evidence gathered, in attempt order.
    ///
    /// The sequence ends with the first [`Evidence::Http`], or, when every
    /// attempt failed and the DNS check is enabled, with its outcome.
    pub async fn probe(&self, target: &Target) -> Vec<Evidence> {
        let mut evidence = Vec::new();

        for protocol in &self.config.protocols {
            let url = target.url(*protocol);
            for strategy in &self.strategies {
                debug!("Probing {url} with {}", strategy.name());
                let outcome = self.attempt_with_deadline(strategy.as_ref(), &url).await;
                let answered = !outcome.is_transport_failure();
                if let Evidence::Transport(failure) = &outcome {
                    debug!("{url} via {}: {} ({})", strategy.name(), failure.kind, failure.message);
                }
                evidence.push(outcome);
                if answered {
                    return evidence;
                }
            }
        }

        if self.config.dns_fallback {
            if let Some(resolver) = &self.resolver {
                evidence.push(dns_check(resolver.as_ref(), target.host()).await);
            }
        }
        evidence
    }

    /// Runs one attempt under a hard deadline.
    ///
    /// Strategies enforce `config.timeout` themselves; the deadline here is a
    /// backstop that drops the in-flight future (closing its socket) if one
    /// does not.
    async fn attempt_with_deadline(&self, strategy: &dyn FetchStrategy, url: &str) -> Evidence {
        let deadline = self.config.timeout + HARD_TIMEOUT_GRACE;
        match tokio::time::timeout(deadline, strategy.attempt(url, &self.config)).await {
            Ok(evidence) => evidence,
            Err(_) => TransportFailure::fetch(
                TransportFailureKind::Timeout,
                url,
                format!("attempt aborted after {:.1}s", deadline.as_secs_f64()),
            )
            .into(),
        }
    }
}

/// Resolves `host` under the DNS timeout budget.
async fn dns_check(resolver: &dyn HostResolver, host: &str) -> Evidence {
    let budget =
        Duration::from_secs(DNS_TIMEOUT_SECS * DNS_ATTEMPTS as u64) + HARD_TIMEOUT_GRACE;
    match tokio::time::timeout(budget, resolver.resolve(host)).await {
        Ok(Ok(addresses)) => {
            debug!("DNS check for {host} resolved to {addresses:?}");
            Evidence::DnsResolved(DnsResolution {
                host: host.to_string(),
                addresses,
            })
        }
        Ok(Err(e)) => {
            debug!("DNS check for {host} failed: {e}");
            TransportFailure::dns_check(host, e.to_string()).into()
        }
        Err(_) => TransportFailure::dns_check(host, "DNS check timed out").into(),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
