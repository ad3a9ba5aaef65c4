//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client (timeouts, redirect policy, TLS verification)
//! - DNS resolver
//! - TLS crypto provider
//! - Check-permit pool

mod client;
mod logger;
mod permits;
mod resolver;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use permits::{CheckPermit, CheckPermits, PermitError};
pub use resolver::init_resolver;

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. Call once at startup,
/// before any TLS connection is made.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
