//! Checks against real sites. Network-dependent, so ignored by default.
//!
//! Run with: cargo test --test live_network -- --ignored

use site_liveness::initialization::init_crypto_provider;
use site_liveness::{LivenessChecker, ProbeConfig};

#[tokio::test]
#[ignore]
async fn test_example_com_is_up() {
    init_crypto_provider();
    let checker = LivenessChecker::new(ProbeConfig::default()).expect("checker should build");

    let report = checker.check("https://www.example.com/").await.unwrap();

    assert_eq!(report.url, "example.com");
    assert!(report.is_up, "reason: {:?}", report.reason);
}

#[tokio::test]
#[ignore]
async fn test_unregistered_domain_is_down() {
    init_crypto_provider();
    let checker = LivenessChecker::new(ProbeConfig::default()).expect("checker should build");

    let report = checker
        .check("this-domain-should-not-exist-4f9a2c.invalid")
        .await
        .unwrap();

    assert!(!report.is_up, "reason: {:?}", report.reason);
}
