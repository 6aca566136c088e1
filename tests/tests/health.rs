//! Tests for health check endpoints.

use axum_test::TestServer;
use integration_tests::setup::TestContext;

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(
        body.get("status").is_some(),
        "Response should have 'status' field"
    );
    assert!(
        body.get("dataset_store_healthy").is_some(),
        "Response should have 'dataset_store_healthy' field"
    );
    assert!(
        body.get("active_datasets").is_some(),
        "Response should have 'active_datasets' field"
    );
}

/// Test /health reports healthy once the store is up
#[tokio::test]
async fn test_health_endpoint_healthy() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dataset_store_healthy"], true);
}

/// Test readiness and liveness probes
#[tokio::test]
async fn test_probes() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server.get("/health/ready").await.assert_status_ok();
    server.get("/health/live").await.assert_status_ok();
}
