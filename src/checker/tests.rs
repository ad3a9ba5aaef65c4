use super::*;
use crate::error_handling::TransportFailureKind;
use crate::probe::{FetchStrategy, HostResolver, HttpResult, TransportFailure};
use crate::initialization::{CheckPermits, PermitError};
use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::Notify;

/// Answers every URL with the same status and headers.
struct FixedStrategy {
    status: Option<u16>,
    headers: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl FetchStrategy for FixedStrategy {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn attempt(&self, url: &str, _config: &ProbeConfig) -> Evidence {
        match self.status {
            Some(status) => {
                let mut result = HttpResult::new(status, url);
                for (name, value) in &self.headers {
                    result = result.with_header(name, *value);
                }
                result.into()
            }
            None => TransportFailure::fetch(TransportFailureKind::ConnectionRefused, url, "refused")
                .into(),
        }
    }
}

struct PanickingStrategy;

#[async_trait]
impl FetchStrategy for PanickingStrategy {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn attempt(&self, _url: &str, _config: &ProbeConfig) -> Evidence {
        panic!("strategy blew up");
    }
}

/// Answers 200 once released.
struct GatedStrategy {
    release: Arc<Notify>,
}

#[async_trait]
impl FetchStrategy for GatedStrategy {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn attempt(&self, url: &str, _config: &ProbeConfig) -> Evidence {
        self.release.notified().await;
        HttpResult::new(200, url).into()
    }
}

struct NoRecords;

#[async_trait]
impl HostResolver for NoRecords {
    async fn resolve(&self, _host: &str) -> anyhow::Result<Vec<IpAddr>> {
        anyhow::bail!("no record found")
    }
}

fn checker(strategy: impl FetchStrategy + 'static) -> LivenessChecker {
    let prober = Prober::with_parts(
        ProbeConfig::default(),
        vec![Arc::new(strategy)],
        Some(Arc::new(NoRecords)),
    );
    LivenessChecker::from_parts(prober, Classifier::default())
}

#[tokio::test]
async fn test_check_reports_normalized_url() {
    let checker = checker(FixedStrategy {
        status: Some(200),
        headers: vec![],
    });

    let report = checker.check("HTTPS://WWW.Example.com/path").await.unwrap();

    assert_eq!(report.url, "example.com");
    assert!(report.is_up);
    assert!(report.reason.is_some());
    assert_eq!(checker.stats().outcome_count(CheckOutcome::Up), 1);
}

#[tokio::test]
async fn test_check_rejects_invalid_input_without_probing() {
    let checker = checker(PanickingStrategy);

    let err = checker.check("   ").await.unwrap_err();

    assert_eq!(err, InvalidInputError::Empty);
    assert_eq!(checker.stats().outcome_count(CheckOutcome::Invalid), 1);
    assert_eq!(checker.stats().total_checks(), 1);
}

#[tokio::test]
async fn test_classify_edge_protected_503() {
    let checker = checker(FixedStrategy {
        status: Some(503),
        headers: vec![("server", "cloudflare")],
    });
    let target = normalize("example.com").unwrap();

    let verdict = checker.classify(&target).await;

    assert!(verdict.is_up);
    assert!(verdict.reason.contains("edge/CDN"));
}

#[tokio::test]
async fn test_unreachable_counts_transport_failures() {
    let checker = checker(FixedStrategy {
        status: None,
        headers: vec![],
    });

    let report = checker.check("example.com").await.unwrap();

    assert!(!report.is_up);
    assert_eq!(report.reason.as_deref(), Some("dns resolution failed"));
    let stats = checker.stats();
    assert_eq!(
        stats.transport_failure_count(TransportFailureKind::ConnectionRefused),
        2
    );
    assert_eq!(
        stats.transport_failure_count(TransportFailureKind::DnsNotFound),
        1
    );
    assert_eq!(stats.outcome_count(CheckOutcome::Down), 1);
}

#[tokio::test]
async fn test_check_isolated_survives_panicking_strategy() {
    let checker = Arc::new(checker(PanickingStrategy));

    let err = checker.check_isolated("example.com", None).await.unwrap_err();

    assert!(matches!(&err, CheckError::Aborted { url, .. } if url == "example.com"));
    let report = err.fallback_report().unwrap();
    assert!(!report.is_up);
    assert_eq!(report.reason.as_deref(), Some("unable to connect"));
    assert_eq!(checker.stats().outcome_count(CheckOutcome::Down), 1);
}

#[tokio::test]
async fn test_check_isolated_holds_permit_until_probe_ends() {
    let release = Arc::new(Notify::new());
    let checker = Arc::new(checker(GatedStrategy {
        release: Arc::clone(&release),
    }));
    let permits = CheckPermits::new(1, Duration::from_millis(50));
    let permit = permits.acquire().await.unwrap();

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        checker.check_isolated("example.com", Some(permit)),
    )
    .await;

    assert!(abandoned.is_err());
    assert_eq!(permits.available(), 0);
    assert!(matches!(
        permits.acquire().await,
        Err(PermitError::Exhausted { .. })
    ));

    release.notify_one();
    tokio::time::timeout(Duration::from_secs(2), async {
        while permits.available() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("permit should come back once the probe finishes");
    assert_eq!(checker.stats().outcome_count(CheckOutcome::Up), 1);
}

#[tokio::test]
async fn test_check_isolated_rejects_invalid_input() {
    let checker = Arc::new(checker(PanickingStrategy));
    let err = checker.check_isolated("localhost", None).await.unwrap_err();
    assert_eq!(err, CheckError::InvalidInput(InvalidInputError::MissingDot));
    assert!(err.fallback_report().is_none());
}

#[test]
fn test_report_serializes_camel_case() {
    let report = CheckReport::failed("example.com");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["url"], "example.com");
    assert_eq!(json["isUp"], false);
    assert_eq!(json["reason"], "unable to connect");
    assert!(json["checkedAt"].as_str().unwrap().contains('T'));
}

#[test]
fn test_with_stats_shares_counters() {
    let stats = Arc::new(ProcessingStats::new());
    let checker = checker(PanickingStrategy).with_stats(Arc::clone(&stats));
    assert!(Arc::ptr_eq(checker.stats(), &stats));
}
