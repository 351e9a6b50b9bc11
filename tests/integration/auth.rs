//! Basic auth gate integration tests
//!
//! The gate runs ahead of every other pipeline stage: a rejected request
//! must trigger neither a token exchange nor an upstream call.

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    basic_auth_header, constants, token_mocks, upstream_mocks, ForwarderTestHarness,
    HarnessOptions,
};

fn gated_options() -> HarnessOptions {
    HarnessOptions {
        auth_username: Some(constants::TEST_USERNAME.to_string()),
        auth_password: Some(constants::TEST_PASSWORD.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_disabled_gate_forwards_without_credentials() {
    let harness = ForwarderTestHarness::new(HarnessOptions::default()).await;

    token_mocks::mock_exchange(&harness.token_endpoint).await;
    upstream_mocks::mock_accept_all(&harness.upstream).await;

    let response = harness
        .server
        .post("/hook")
        .add_header(harness.proto_header(), "http".parse().unwrap())
        .json(&json!({}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_credentials_are_challenged() {
    let harness = ForwarderTestHarness::new(gated_options()).await;

    token_mocks::mock_no_exchange(&harness.token_endpoint).await;
    upstream_mocks::mock_no_calls(&harness.upstream).await;

    let response = harness
        .server
        .post("/hook")
        .add_header(harness.proto_header(), "http".parse().unwrap())
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .unwrap()
            .to_str()
            .unwrap(),
        "Basic realm=\"Login Required\""
    );
    assert!(harness.upstream_requests().await.is_empty());
}

#[tokio::test]
async fn test_wrong_credentials_are_rejected() {
    let harness = ForwarderTestHarness::new(gated_options()).await;

    token_mocks::mock_no_exchange(&harness.token_endpoint).await;
    upstream_mocks::mock_no_calls(&harness.upstream).await;

    let response = harness
        .server
        .post("/hook")
        .add_header(harness.proto_header(), "http".parse().unwrap())
        .add_header(
            header::AUTHORIZATION,
            basic_auth_header(constants::TEST_USERNAME, "wrong")
                .parse()
                .unwrap(),
        )
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_basic_authorization_is_rejected() {
    let harness = ForwarderTestHarness::new(gated_options()).await;

    token_mocks::mock_no_exchange(&harness.token_endpoint).await;
    upstream_mocks::mock_no_calls(&harness.upstream).await;

    let response = harness
        .server
        .post("/hook")
        .add_header(harness.proto_header(), "http".parse().unwrap())
        .add_header(header::AUTHORIZATION, "Bearer some-token".parse().unwrap())
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_credentials_forward_with_bearer_replacement() {
    let harness = ForwarderTestHarness::new(gated_options()).await;

    token_mocks::mock_exchange(&harness.token_endpoint).await;
    upstream_mocks::mock_accept_all(&harness.upstream).await;

    let response = harness
        .server
        .post("/hook")
        .add_header(harness.proto_header(), "http".parse().unwrap())
        .add_header(
            header::AUTHORIZATION,
            basic_auth_header(constants::TEST_USERNAME, constants::TEST_PASSWORD)
                .parse()
                .unwrap(),
        )
        .json(&json!({}))
        .await;

    response.assert_status_ok();

    // The basic credentials never reach the upstream; the bearer token does
    let requests = harness.upstream_requests().await;
    assert_eq!(requests.len(), 1);
    let authorization = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(authorization.starts_with("Bearer "));
}
