//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_REDIRECTS, DEFAULT_SERVER_PORT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, MAX_CONCURRENCY_LIMIT, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};
use crate::probe::{Protocol, ProbeConfig, RequestHeaders};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Check a couple of sites
/// site_liveness check example.com https://www.rust-lang.org/learn
///
/// # Serve the check endpoint on port 8080
/// site_liveness serve --port 8080
///
/// # Plain HTTP only, verify certificates, debug logging
/// site_liveness --http-only --verify-tls --log-level debug check example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "site_liveness",
    about = "Decides whether websites are up for a human visitor."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Probe settings
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Maximum number of checks running at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, global = true)]
    pub max_concurrency: usize,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Probe tuning shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ProbeArgs {
    /// Per-attempt timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS, global = true)]
    pub max_redirects: usize,

    /// Reject expired or self-signed certificates.
    ///
    /// Off by default: a site with a broken certificate is still up for a
    /// visitor willing to click through the warning.
    #[arg(long, global = true)]
    pub verify_tls: bool,

    /// Skip the DNS-only check when every protocol attempt fails
    #[arg(long, global = true)]
    pub no_dns_fallback: bool,

    /// Try a HEAD request before GET
    #[arg(long, global = true)]
    pub head_first: bool,

    /// Probe over plain HTTP only (no HTTPS attempt)
    #[arg(long, global = true)]
    pub http_only: bool,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check one or more domains or URLs and print a verdict per line
    Check {
        /// Domains or URLs to check
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Serve the check endpoint over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,
    },
}

impl Cli {
    /// Validates numeric options that clap cannot range-check on its own.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending option.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(format!(
                "--max-concurrency must be between 1 and {MAX_CONCURRENCY_LIMIT} (got {})",
                self.max_concurrency
            ));
        }
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.probe.timeout_seconds) {
            return Err(format!(
                "--timeout-seconds must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} (got {})",
                self.probe.timeout_seconds
            ));
        }
        Ok(())
    }
}

impl ProbeArgs {
    /// Builds the probe configuration these flags describe.
    pub fn to_probe_config(&self) -> ProbeConfig {
        let protocols = if self.http_only {
            vec![Protocol::Http]
        } else {
            vec![Protocol::Https, Protocol::Http]
        };
        ProbeConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            max_redirects: self.max_redirects,
            verify_tls: self.verify_tls,
            headers: RequestHeaders::browser(&self.user_agent),
            protocols,
            dns_fallback: !self.no_dns_fallback,
            head_first: self.head_first,
            ..ProbeConfig::default()
        }
    }
}
