//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including timeouts, size limits, and classification thresholds.

use std::time::Duration;

// Probe timeouts
/// Per-attempt HTTP timeout in seconds
/// Covers connect, TLS, redirects and body read for one protocol attempt
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Grace period added on top of the per-attempt timeout before the in-flight
/// future is dropped (which closes the socket)
pub const HARD_TIMEOUT_GRACE: Duration = Duration::from_millis(500);
/// Lowest accepted per-attempt timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Highest accepted per-attempt timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 60;

// DNS
/// DNS query timeout in seconds for the DNS-only fallback check
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS query attempts before the fallback check gives up
pub const DNS_ATTEMPTS: usize = 2;

// Redirect handling
/// Maximum number of redirect hops to follow
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// Response and body size limits
/// Maximum number of body bytes captured per response (512KB)
/// Anything past this is dropped; the evidence is marked truncated
pub const MAX_CAPTURED_BODY_SIZE: usize = 512 * 1024;
/// Maximum number of response headers kept as evidence
/// Protects against header bomb responses
pub const MAX_HEADER_COUNT: usize = 100;

// Classification
/// Bodies at or above this size are never considered parked pages (64KB)
/// Parking templates are small; large sites mention "domain" and "sale" incidentally
pub const PARKED_PAGE_MAX_BODY_SIZE: usize = 64 * 1024;

// Hostname limits
/// Maximum hostname length (RFC 1035)
pub const MAX_HOSTNAME_LENGTH: usize = 253;
/// Minimum hostname length ("a.b")
pub const MIN_HOSTNAME_LENGTH: usize = 3;

// Concurrency
/// Default number of checks allowed to run at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 32;
/// Upper bound accepted for `--max-concurrency`
pub const MAX_CONCURRENCY_LIMIT: usize = 1024;
/// How long a server request waits for a check permit before answering 503
pub const PERMIT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

// Server
/// Default port of the HTTP boundary; `PORT` overrides it
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a current desktop Chrome on Windows. Some origins answer bare
/// library user agents with 403 or a challenge page.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Default Accept header sent with every probe.
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
/// Default Accept-Language header.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// Default Referer header (simulates arriving from a search engine).
pub const DEFAULT_REFERER: &str = "https://www.google.com/";
