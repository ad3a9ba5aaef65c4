//! Evidence classifier.
//!
//! Resolves a probe's evidence sequence into a single [`Verdict`]. Precedence,
//! highest first:
//! - transport handling, when no HTTP response was obtained
//! - edge/CDN protection
//! - known bot-blocking platform answering 401/403/429
//! - small parked or for-sale page
//! - status-code default
//!
//! Classification is a pure function of the evidence, the target and the
//! signature sets. It performs no I/O and cannot fail.

mod rules;
mod signatures;
mod verdict;

use std::sync::Arc;

use crate::config::PARKED_PAGE_MAX_BODY_SIZE;
use crate::domain::Target;
use crate::probe::Evidence;

// Re-export public API
pub use signatures::Signatures;
pub use verdict::{RuleId, Verdict};

/// Tunables of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Bodies of this many bytes or more are never considered parked pages.
    pub parked_max_body_size: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            parked_max_body_size: PARKED_PAGE_MAX_BODY_SIZE,
        }
    }
}

/// Applies the decision table with a fixed set of signatures.
#[derive(Debug, Clone)]
pub struct Classifier {
    signatures: Arc<Signatures>,
    config: ClassifierConfig,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Signatures::shared(), ClassifierConfig::default())
    }
}

impl Classifier {
    /// Classifier over the given signature sets and thresholds.
    pub fn new(signatures: Arc<Signatures>, config: ClassifierConfig) -> Self {
        Self { signatures, config }
    }

    /// Signature sets in use.
    pub fn signatures(&self) -> &Signatures {
        &self.signatures
    }

    /// Classifies the evidence gathered for `target`.
    ///
    /// The first HTTP response in the sequence is the one judged; transport
    /// failures and DNS evidence only matter when there is no response at all.
    pub fn classify(&self, evidence: &[Evidence], target: &Target) -> Verdict {
        match evidence.iter().find_map(Evidence::as_http) {
            Some(result) => {
                let input =
                    rules::RuleInput::new(result, target, &self.signatures, &self.config);
                rules::evaluate(&input)
            }
            None => rules::transport_verdict(evidence),
        }
    }
}

/// Classifies with the built-in signatures and default thresholds.
pub fn classify(evidence: &[Evidence], target: &Target) -> Verdict {
    Classifier::default().classify(evidence, target)
}
