//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{CheckOutcome, ProcessingStats, TransportFailureKind};

/// Prints a one-line summary followed by transport failure counts.
pub fn print_final_statistics(stats: &ProcessingStats, elapsed_seconds: f64) {
    print_simple_summary(stats, elapsed_seconds);
    print_transport_statistics(stats);
}

fn print_simple_summary(stats: &ProcessingStats, elapsed_seconds: f64) {
    let total = stats.total_checks();
    info!(
        "Checked {} domain{} ({} up, {} down, {} invalid) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        stats.outcome_count(CheckOutcome::Up),
        stats.outcome_count(CheckOutcome::Down),
        stats.outcome_count(CheckOutcome::Invalid),
        elapsed_seconds
    );
}

/// Prints transport failure counts to the log, skipping kinds never seen.
pub fn print_transport_statistics(stats: &ProcessingStats) {
    let total = stats.total_transport_failures();
    if total == 0 {
        return;
    }

    info!("Transport Failures ({} total):", total);
    for kind in TransportFailureKind::iter() {
        let count = stats.transport_failure_count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}
