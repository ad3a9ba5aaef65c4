//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` probes are sent with.

use reqwest::redirect::Policy;
use reqwest::ClientBuilder;

use crate::probe::ProbeConfig;

/// Initializes the HTTP client for probing.
///
/// Creates a `reqwest::Client` configured with:
/// - Connect timeout and overall timeout from the probe config
/// - Redirect following up to `max_redirects` hops; past that, the last
///   redirect response is returned as final instead of failing
/// - Certificate verification disabled unless `verify_tls` is set
/// - Rustls TLS backend and transparent gzip/brotli/deflate decoding
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ProbeConfig) -> Result<reqwest::Client, reqwest::Error> {
    let max_redirects = config.max_redirects;
    let redirect_policy = Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            attempt.stop()
        } else {
            attempt.follow()
        }
    });

    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout.min(config.timeout))
        .redirect(redirect_policy)
        .danger_accept_invalid_certs(!config.verify_tls)
        .user_agent(config.headers.user_agent.clone())
        .build()
}
