//! Server state and wire types.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::checker::LivenessChecker;
use crate::initialization::CheckPermits;

/// Shared state for the check server
#[derive(Clone)]
pub struct ServerState {
    /// Checker shared by all requests
    pub checker: Arc<LivenessChecker>,
    /// Bounds concurrent checks
    pub permits: CheckPermits,
    /// Server start, for `/status` uptime
    pub start_time: Arc<Instant>,
}

impl ServerState {
    /// Wraps a checker and its permit pool; uptime counts from here.
    pub fn new(checker: Arc<LivenessChecker>, permits: CheckPermits) -> Self {
        Self {
            checker,
            permits,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Body of `POST /api/check`
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Raw domain or URL
    pub url: Option<String>,
}

/// Query of `GET /api/check`
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// Raw domain or URL
    pub domain: Option<String>,
}

/// Body of every 4xx/503 answer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// What went wrong
    pub error: String,
}

/// JSON response for `/status` endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Checks finished since startup
    pub total_checks: usize,
    /// Of which up
    pub up: usize,
    /// Of which down
    pub down: usize,
    /// Inputs rejected before probing
    pub invalid: usize,
    /// Failed attempts, including ones a later attempt recovered from
    pub transport_failures: TransportFailureCounts,
    /// Seconds since the server started
    pub elapsed_seconds: f64,
    /// Check slot usage
    pub permits: PermitCounts,
}

/// Transport failure tally for `/status`
#[derive(Debug, Serialize)]
pub struct TransportFailureCounts {
    /// All kinds together
    pub total: usize,
    /// Count per failure kind, keyed by its kebab-case name
    pub by_kind: BTreeMap<&'static str, usize>,
}

/// Check slot usage for `/status`
#[derive(Debug, Serialize)]
pub struct PermitCounts {
    /// Maximum concurrent checks
    pub capacity: usize,
    /// Slots free right now
    pub available: usize,
}
