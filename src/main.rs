//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_liveness` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use site_liveness::initialization::{init_crypto_provider, init_logger_with};
use site_liveness::{run_checks, run_server, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. PORT or RUST_LOG
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    if let Err(message) = cli.validate() {
        eprintln!("site_liveness error: {}", message);
        process::exit(2);
    }

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let probe_config = cli.probe.to_probe_config();
    match cli.command {
        Command::Check { domains } => {
            match run_checks(probe_config, domains, cli.max_concurrency).await {
                Ok(report) => {
                    if !report.summary.all_up() {
                        process::exit(1);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("site_liveness error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        Command::Serve { port } => {
            if let Err(e) = run_server(probe_config, port, cli.max_concurrency).await {
                eprintln!("site_liveness error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
    }
}
