//! Main application modules.
//!
//! This module provides batch checking, verdict output, shutdown handling,
//! and statistics printing used by the main application.

pub mod batch;
pub mod output;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use batch::{check_all, BatchEntry, BatchSummary};
pub use output::{format_rejection, format_report};
pub use shutdown::cancel_on_ctrl_c;
pub use statistics::print_final_statistics;
