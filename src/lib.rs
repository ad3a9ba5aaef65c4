//! site_liveness library: evidence-based website liveness checks
//!
//! Decides whether a website is up for a human visitor. Raw status codes are
//! weak signals (bot blocks answer 403/429, protective edges answer 503,
//! parked domains answer 200), so a check gathers evidence with one or more
//! probes and resolves it through an ordered rule set into a boolean verdict
//! with a reason.
//!
//! The pipeline has three stages:
//! - [`normalize`] turns raw input into a [`Target`] hostname
//! - [`Prober`] gathers [`Evidence`] over HTTPS, then HTTP, then DNS
//! - [`Classifier`] resolves the evidence into a [`Verdict`]
//!
//! [`LivenessChecker`] composes them.
//!
//! # Example
//!
//! ```no_run
//! use site_liveness::{LivenessChecker, ProbeConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = LivenessChecker::new(ProbeConfig::default())?;
//! let report = checker.check("https://www.example.com/").await?;
//! println!("{} is up: {} ({:?})", report.url, report.is_up, report.reason);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod checker;
pub mod classify;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod probe;
pub mod server;

// Re-export public API
pub use checker::{CheckError, CheckReport, LivenessChecker};
pub use classify::{classify, Classifier, ClassifierConfig, RuleId, Signatures, Verdict};
pub use config::{Cli, Command, LogFormat, LogLevel};
pub use domain::{normalize, Target};
pub use error_handling::{InvalidInputError, TransportFailureKind};
pub use probe::{Evidence, FetchStrategy, HttpResult, ProbeConfig, Prober, TransportFailure};
pub use run::{run_checks, run_server, RunReport};

// Internal run module (contains the entry points behind each subcommand)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::sync::Arc;
    use std::time::Instant;

    use tokio_util::sync::CancellationToken;

    use crate::app::{
        cancel_on_ctrl_c, check_all, format_rejection, format_report, print_final_statistics,
        BatchEntry, BatchSummary,
    };
    use crate::checker::LivenessChecker;
    use crate::config::PERMIT_ACQUIRE_TIMEOUT;
    use crate::initialization::CheckPermits;
    use crate::probe::ProbeConfig;
    use crate::server::{start_server, ServerState};

    /// Results of a batch check run.
    #[derive(Debug, Clone, Copy)]
    pub struct RunReport {
        /// Verdict tally
        pub summary: BatchSummary,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Checks every input, printing one verdict line per input as it completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn run_checks(
        probe_config: ProbeConfig,
        inputs: Vec<String>,
        max_concurrency: usize,
    ) -> Result<RunReport> {
        let start_time = Instant::now();
        let checker =
            Arc::new(LivenessChecker::new(probe_config).context("Failed to initialize checker")?);
        info!(
            "Checking {} input{} (max concurrency {})",
            inputs.len(),
            if inputs.len() == 1 { "" } else { "s" },
            max_concurrency
        );

        let summary = check_all(Arc::clone(&checker), inputs, max_concurrency, |entry| {
            match entry {
                BatchEntry::Checked(report) => println!("{}", format_report(report)),
                BatchEntry::Rejected { raw, error } => println!("{}", format_rejection(raw, error)),
            }
        })
        .await;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_final_statistics(checker.stats(), elapsed_seconds);

        Ok(RunReport {
            summary,
            elapsed_seconds,
        })
    }

    /// Serves the check endpoint on `port` until ctrl-c.
    ///
    /// # Errors
    ///
    /// Returns an error if the checker cannot be built, the port cannot be
    /// bound, or the server fails.
    pub async fn run_server(
        probe_config: ProbeConfig,
        port: u16,
        max_concurrency: usize,
    ) -> Result<()> {
        let start_time = Instant::now();
        let checker =
            Arc::new(LivenessChecker::new(probe_config).context("Failed to initialize checker")?);
        let permits = CheckPermits::new(max_concurrency, PERMIT_ACQUIRE_TIMEOUT);
        let state = ServerState::new(Arc::clone(&checker), permits);

        let shutdown = CancellationToken::new();
        let watcher = cancel_on_ctrl_c(shutdown.clone());
        let result = start_server(port, state, shutdown.clone()).await;

        shutdown.cancel();
        let _ = watcher.await;
        print_final_statistics(checker.stats(), start_time.elapsed().as_secs_f64());
        result
    }
}
