//! Processing statistics tracking.
//!
//! Thread-safe counters for check outcomes and transport failures, shared by
//! every concurrent check through an `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::TransportFailureKind;

/// Outcome of one check, as counted by [`ProcessingStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Verdict `isUp=true`
    Up,
    /// Verdict `isUp=false`
    Down,
    /// Input rejected before probing
    Invalid,
}

/// Thread-safe processing statistics tracker.
///
/// All transport failure kinds are initialized to zero on creation, so
/// increments never allocate.
pub struct ProcessingStats {
    up: AtomicUsize,
    down: AtomicUsize,
    invalid: AtomicUsize,
    transport_failures: HashMap<TransportFailureKind, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    /// All counters at zero.
    pub fn new() -> Self {
        let mut transport_failures = HashMap::new();
        for kind in TransportFailureKind::iter() {
            transport_failures.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats {
            up: AtomicUsize::new(0),
            down: AtomicUsize::new(0),
            invalid: AtomicUsize::new(0),
            transport_failures,
        }
    }

    /// Records the outcome of a finished check.
    pub fn record_outcome(&self, outcome: CheckOutcome) {
        let counter = match outcome {
            CheckOutcome::Up => &self.up,
            CheckOutcome::Down => &self.down,
            CheckOutcome::Invalid => &self.invalid,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one transport failure observed during probing.
    pub fn increment_transport_failure(&self, kind: TransportFailureKind) {
        if let Some(counter) = self.transport_failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment transport failure counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Count for one outcome.
    pub fn outcome_count(&self, outcome: CheckOutcome) -> usize {
        match outcome {
            CheckOutcome::Up => self.up.load(Ordering::SeqCst),
            CheckOutcome::Down => self.down.load(Ordering::SeqCst),
            CheckOutcome::Invalid => self.invalid.load(Ordering::SeqCst),
        }
    }

    /// Count for one transport failure kind.
    pub fn transport_failure_count(&self, kind: TransportFailureKind) -> usize {
        self.transport_failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of checks recorded, invalid input included.
    pub fn total_checks(&self) -> usize {
        self.outcome_count(CheckOutcome::Up)
            + self.outcome_count(CheckOutcome::Down)
            + self.outcome_count(CheckOutcome::Invalid)
    }

    /// Total number of transport failures across all kinds.
    pub fn total_transport_failures(&self) -> usize {
        TransportFailureKind::iter()
            .map(|kind| self.transport_failure_count(kind))
            .sum()
    }
}
