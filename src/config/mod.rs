//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, thresholds)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, LogFormat, LogLevel, ProbeArgs};
