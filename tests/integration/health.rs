//! Operational endpoint integration tests
//!
//! The health and metrics endpoints are served locally: they bypass the
//! auth gate and the whitelist, and are never forwarded upstream.

use serde_json::Value;

use crate::common::{
    constants, token_mocks, upstream_mocks, ForwarderTestHarness, HarnessOptions,
};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let harness = ForwarderTestHarness::new(HarnessOptions::default()).await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["uptime_seconds"].is_u64());

    let version = json["version"].as_str().unwrap();
    assert!(!version.is_empty(), "Version should not be empty");
    assert!(version.contains('.'), "Version should be in semver format");

    let timestamp = json["timestamp"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(timestamp);
    assert!(parsed.is_ok(), "Timestamp should be valid RFC3339 format");
}

#[tokio::test]
async fn test_health_live_endpoint() {
    let harness = ForwarderTestHarness::new(HarnessOptions::default()).await;

    let response = harness.server.get("/health/live").await;

    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let harness = ForwarderTestHarness::new(HarnessOptions::default()).await;

    let response = harness.server.get("/metrics").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_operational_endpoints_bypass_gate_and_whitelist() {
    // Auth enabled, whitelist empty: every forwardable path is locked down
    let harness = ForwarderTestHarness::new(HarnessOptions {
        whitelist: vec![],
        auth_username: Some(constants::TEST_USERNAME.to_string()),
        auth_password: Some(constants::TEST_PASSWORD.to_string()),
        ..Default::default()
    })
    .await;

    token_mocks::mock_no_exchange(&harness.token_endpoint).await;
    upstream_mocks::mock_no_calls(&harness.upstream).await;

    let response = harness.server.get("/health").await;
    response.assert_status_ok();

    let response = harness.server.get("/health/live").await;
    response.assert_status_ok();

    assert!(harness.upstream_requests().await.is_empty());
}
