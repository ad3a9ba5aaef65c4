//! JSON status handler.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use strum::IntoEnumIterator;

use super::super::types::{PermitCounts, ServerState, StatusResponse, TransportFailureCounts};
use crate::error_handling::{CheckOutcome, TransportFailureKind};

/// JSON status endpoint with check counters
pub async fn status_handler(State(state): State<ServerState>) -> Json<StatusResponse> {
    let stats = state.checker.stats();

    let by_kind: BTreeMap<&'static str, usize> = TransportFailureKind::iter()
        .map(|kind| (kind.as_str(), stats.transport_failure_count(kind)))
        .collect();

    Json(StatusResponse {
        total_checks: stats.total_checks(),
        up: stats.outcome_count(CheckOutcome::Up),
        down: stats.outcome_count(CheckOutcome::Down),
        invalid: stats.outcome_count(CheckOutcome::Invalid),
        transport_failures: TransportFailureCounts {
            total: stats.total_transport_failures(),
            by_kind,
        },
        elapsed_seconds: state.start_time.elapsed().as_secs_f64(),
        permits: PermitCounts {
            capacity: state.permits.capacity(),
            available: state.permits.available(),
        },
    })
}
