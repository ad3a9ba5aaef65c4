//! Liveness checker.
//!
//! Composes the three stages into the two call contracts offered to hosts:
//! - [`LivenessChecker::classify`]: probe a normalized [`Target`] and classify the evidence
//! - [`LivenessChecker::check`]: normalize raw input first and return a [`CheckReport`]
//!
//! Checks share nothing mutable except the statistics counters, so any number
//! of them can run concurrently on one checker.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::classify::{Classifier, Verdict};
use crate::domain::{normalize, Target};
use crate::error_handling::{
    CheckOutcome, InitializationError, InvalidInputError, ProcessingStats,
};
use crate::initialization::CheckPermit;
use crate::probe::{Evidence, ProbeConfig, Prober};

/// Result of one check, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Normalized hostname that was checked.
    pub url: String,
    /// Verdict
    pub is_up: bool,
    /// Advisory explanation of the verdict
    pub reason: Option<String>,
    /// When the verdict was reached
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    /// Report for a finished classification.
    pub fn from_verdict(target: &Target, verdict: Verdict) -> Self {
        Self {
            url: target.hostname().to_string(),
            is_up: verdict.is_up,
            reason: Some(verdict.reason),
            checked_at: Utc::now(),
        }
    }

    /// The safe default when a check could not complete.
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_up: false,
            reason: Some(Verdict::unable_to_connect().reason),
            checked_at: Utc::now(),
        }
    }
}

/// Why an isolated check produced no verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The input is not a hostname; nothing was probed.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// The probe task died before reaching a verdict.
    #[error("check of {url} aborted: {message}")]
    Aborted {
        /// Normalized hostname being checked
        url: String,
        /// Join error text
        message: String,
    },
}

impl CheckError {
    /// The report to hand out in place of a verdict, if a target was known.
    pub fn fallback_report(&self) -> Option<CheckReport> {
        match self {
            CheckError::InvalidInput(_) => None,
            CheckError::Aborted { url, .. } => Some(CheckReport::failed(url.clone())),
        }
    }
}

/// Probes and classifies targets.
pub struct LivenessChecker {
    prober: Prober,
    classifier: Classifier,
    stats: Arc<ProcessingStats>,
}

impl LivenessChecker {
    /// A checker using reqwest, hickory and the built-in signatures.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ProbeConfig) -> Result<Self, InitializationError> {
        Ok(Self::from_parts(Prober::new(config)?, Classifier::default()))
    }

    /// A checker from explicit parts, with fresh statistics.
    pub fn from_parts(prober: Prober, classifier: Classifier) -> Self {
        Self {
            prober,
            classifier,
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Replaces the statistics sink.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Shared statistics sink.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Probe settings in use.
    pub fn probe_config(&self) -> &ProbeConfig {
        self.prober.config()
    }

    /// Probes `target` and classifies the evidence.
    ///
    /// Never fails: transport problems are evidence and the classifier always
    /// reaches a verdict.
    pub async fn classify(&self, target: &Target) -> Verdict {
        let evidence = self.prober.probe(target).await;
        self.record_transport_failures(&evidence);

        let verdict = self.classifier.classify(&evidence, target);
        self.stats.record_outcome(if verdict.is_up {
            CheckOutcome::Up
        } else {
            CheckOutcome::Down
        });
        info!(
            "{} is {} ({}) after {} attempt(s)",
            target,
            if verdict.is_up { "up" } else { "down" },
            verdict.reason,
            evidence.len()
        );
        verdict
    }

    /// Normalizes raw input, then probes and classifies it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] when the input is not a hostname; nothing
    /// is probed in that case.
    pub async fn check(&self, raw: &str) -> Result<CheckReport, InvalidInputError> {
        let target = self.normalize_counted(raw)?;
        let verdict = self.classify(&target).await;
        Ok(CheckReport::from_verdict(&target, verdict))
    }

    /// Like [`LivenessChecker::check`], but probes on a separate task so a
    /// panic anywhere in the probe is contained.
    ///
    /// `permit` moves into the probe task and is released when the probe
    /// ends, even if the caller stops waiting first.
    ///
    /// # Errors
    ///
    /// [`CheckError::InvalidInput`] when the input is not a hostname,
    /// [`CheckError::Aborted`] when the probe task panicked or was cancelled.
    /// The aborted check is counted as down.
    pub async fn check_isolated(
        self: &Arc<Self>,
        raw: &str,
        permit: Option<CheckPermit>,
    ) -> Result<CheckReport, CheckError> {
        let target = self.normalize_counted(raw)?;
        let checker = Arc::clone(self);
        let task_target = target.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            checker.classify(&task_target).await
        });

        match handle.await {
            Ok(verdict) => Ok(CheckReport::from_verdict(&target, verdict)),
            Err(e) => {
                warn!("Check of {} aborted: {}", target, e);
                self.stats.record_outcome(CheckOutcome::Down);
                Err(CheckError::Aborted {
                    url: target.hostname().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    fn normalize_counted(&self, raw: &str) -> Result<Target, InvalidInputError> {
        normalize(raw).inspect_err(|e| {
            debug!("Rejected input {:?}: {}", raw, e);
            self.stats.record_outcome(CheckOutcome::Invalid);
        })
    }

    fn record_transport_failures(&self, evidence: &[Evidence]) {
        for failure in evidence.iter().filter_map(Evidence::as_transport_failure) {
            self.stats.increment_transport_failure(failure.kind);
        }
    }
}

#[cfg(test)]
mod tests;
