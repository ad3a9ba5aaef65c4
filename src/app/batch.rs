//! Batch checking for the `check` subcommand.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::checker::{CheckError, CheckReport, LivenessChecker};

/// Outcome of one input in a batch.
#[derive(Debug, Clone)]
pub enum BatchEntry {
    /// The input was probed (or its probe aborted) and has a report.
    Checked(CheckReport),
    /// The input was rejected before probing.
    Rejected {
        /// Input as given
        raw: String,
        /// Why it was rejected
        error: CheckError,
    },
}

/// Tally of a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Inputs judged up
    pub up: usize,
    /// Inputs judged down, aborted checks included
    pub down: usize,
    /// Inputs rejected by normalization
    pub invalid: usize,
}

impl BatchSummary {
    /// True when every input was valid and up.
    pub fn all_up(&self) -> bool {
        self.down == 0 && self.invalid == 0
    }

    fn record(&mut self, entry: &BatchEntry) {
        match entry {
            BatchEntry::Checked(report) if report.is_up => self.up += 1,
            BatchEntry::Checked(_) => self.down += 1,
            BatchEntry::Rejected { .. } => self.invalid += 1,
        }
    }
}

/// Checks every input with at most `max_concurrency` checks in flight.
///
/// `on_entry` sees each entry as it completes, in completion order.
pub async fn check_all<F>(
    checker: Arc<LivenessChecker>,
    inputs: Vec<String>,
    max_concurrency: usize,
    mut on_entry: F,
) -> BatchSummary
where
    F: FnMut(&BatchEntry),
{
    let mut entries = stream::iter(inputs)
        .map(|raw| {
            let checker = Arc::clone(&checker);
            async move {
                match checker.check_isolated(&raw, None).await {
                    Ok(report) => BatchEntry::Checked(report),
                    Err(error) => match error.fallback_report() {
                        Some(report) => BatchEntry::Checked(report),
                        None => BatchEntry::Rejected { raw, error },
                    },
                }
            }
        })
        .buffer_unordered(max_concurrency.max(1));

    let mut summary = BatchSummary::default();
    while let Some(entry) = entries.next().await {
        summary.record(&entry);
        on_entry(&entry);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::probe::{Evidence, FetchStrategy, HttpResult, ProbeConfig, Prober};
    use async_trait::async_trait;

    struct StatusByHost;

    #[async_trait]
    impl FetchStrategy for StatusByHost {
        fn name(&self) -> &'static str {
            "status-by-host"
        }

        async fn attempt(&self, url: &str, _config: &ProbeConfig) -> Evidence {
            let status = if url.contains("broken") { 502 } else { 200 };
            HttpResult::new(status, url).into()
        }
    }

    fn checker() -> Arc<LivenessChecker> {
        let prober = Prober::with_parts(
            ProbeConfig::default(),
            vec![Arc::new(StatusByHost)],
            None,
        );
        Arc::new(LivenessChecker::from_parts(prober, Classifier::default()))
    }

    #[tokio::test]
    async fn test_check_all_tallies_every_input() {
        let inputs = vec![
            "example.com".to_string(),
            "broken.example".to_string(),
            "nodot".to_string(),
            "https://www.rust-lang.org/learn".to_string(),
        ];
        let mut seen = Vec::new();

        let summary = check_all(checker(), inputs, 2, |entry| seen.push(entry.clone())).await;

        assert_eq!(
            summary,
            BatchSummary {
                up: 2,
                down: 1,
                invalid: 1
            }
        );
        assert!(!summary.all_up());
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().any(|entry| matches!(
            entry,
            BatchEntry::Rejected { raw, .. } if raw == "nodot"
        )));
    }

    #[tokio::test]
    async fn test_all_up_batch() {
        let summary = check_all(
            checker(),
            vec!["example.com".to_string(), "example.org".to_string()],
            8,
            |_| {},
        )
        .await;
        assert!(summary.all_up());
        assert_eq!(summary.up, 2);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let summary = check_all(checker(), vec!["example.com".to_string()], 0, |_| {}).await;
        assert_eq!(summary.up, 1);
    }
}
