//! Tests for aggregation failure isolation and error codes.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

/// A missing column fails only the aggregations that need it; the
/// dataset stays usable for the others.
#[tokio::test]
async fn test_missing_column_isolated_to_dimension() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let upload: serde_json::Value = server
        .post("/datasets")
        .content_type("text/csv")
        .bytes(fixtures::no_timestamp_payload().into())
        .await
        .json();
    let id = upload["dataset_id"].as_str().unwrap().to_string();

    // Time-based aggregations need the timestamp column.
    let response = server
        .get(&format!("/datasets/{}/aggregates/hourly", id))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "missing_column");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("trans_date_trans_time"));

    // Demographic aggregations on the same dataset still work.
    let response = server
        .get(&format!("/datasets/{}/aggregates/gender", id))
        .await;
    response.assert_status_ok();
}

/// An unknown dimension name is a 404 with its own code.
#[tokio::test]
async fn test_unknown_dimension() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let upload: serde_json::Value = server
        .post("/datasets")
        .content_type("text/csv")
        .bytes(fixtures::sample_payload().into())
        .await
        .json();
    let id = upload["dataset_id"].as_str().unwrap().to_string();

    let response = server
        .get(&format!("/datasets/{}/aggregates/zodiac", id))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "unknown_dimension");
}

/// Rows with unparsable timestamps are excluded from the hourly
/// series, and the exclusion count is observable.
#[tokio::test]
async fn test_unparsable_rows_excluded_and_counted() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let upload: serde_json::Value = server
        .post("/datasets")
        .content_type("text/csv")
        .bytes(fixtures::dirty_payload().into())
        .await
        .json();
    let id = upload["dataset_id"].as_str().unwrap().to_string();

    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/hourly", id))
        .await
        .json();
    // The fraud row with the broken timestamp is excluded; the other
    // fraud row still lands at 14:00.
    assert_eq!(body["table"]["excluded_rows"], 1);
    assert_eq!(body["table"]["points"][14]["count"], 1);

    // The state table does not depend on the timestamp, so nothing is
    // excluded there.
    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/state", id))
        .await
        .json();
    assert_eq!(body["table"]["excluded_rows"], 0);
}

/// Aggregating against an id that was never uploaded is a 404.
#[tokio::test]
async fn test_aggregate_unknown_dataset() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .get("/datasets/00000000-0000-0000-0000-000000000000/aggregates/hourly")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "dataset_not_found");
}
