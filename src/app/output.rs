//! Verdict lines printed by `check`.

use std::fmt::Display;

use colored::*;

use crate::checker::CheckReport;

/// One colored line for a finished check: status, hostname, reason.
pub fn format_report(report: &CheckReport) -> String {
    let status = if report.is_up {
        "UP     ".green().bold()
    } else {
        "DOWN   ".red().bold()
    };
    format!(
        "{} {} {}",
        status,
        report.url,
        report.reason.as_deref().unwrap_or("").dimmed()
    )
}

/// One colored line for input that was never checked.
pub fn format_rejection(raw: &str, error: &dyn Display) -> String {
    format!("{} {:?} {}", "INVALID".yellow().bold(), raw, error.to_string().dimmed())
}
