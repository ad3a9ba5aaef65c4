//! Probe executor.
//!
//! This module gathers evidence about a target:
//! - `ProbeConfig` describes how probes are issued (timeouts, redirects, TLS, headers, protocols)
//! - `FetchStrategy` implementations turn a URL into one piece of `Evidence`
//! - `HostResolver` backs the DNS-only fallback check
//! - `Prober` runs protocols and strategies in order and stops at the first HTTP answer
//!
//! Transport errors never escape this module; they are recorded as evidence.

mod config;
mod dns;
mod evidence;
mod executor;
mod strategy;

// Re-export public API
pub use config::{ProbeConfig, Protocol, RequestHeaders};
pub use dns::HostResolver;
pub use evidence::{DnsResolution, Evidence, HttpResult, ProbeStage, TransportFailure};
pub use executor::Prober;
pub use strategy::{FetchStrategy, ReqwestStrategy};
