//! End-to-end tests for the aggregation endpoints.
//!
//! The sample fixture has two fraud rows (Sunday 10:00 M adult CA,
//! Monday 14:05 F senior CA) and one legit row (Sunday 10:15 F teen
//! TX).

use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

async fn upload(server: &TestServer) -> String {
    let body: serde_json::Value = server
        .post("/datasets")
        .content_type("text/csv")
        .bytes(fixtures::sample_payload().into())
        .await
        .json();
    body["dataset_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_hourly_series_is_dense() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    let response = server
        .get(&format!("/datasets/{}/aggregates/hourly", id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["dimension"], "hourly");
    assert_eq!(body["chart"], "line");

    let points = body["table"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 24);
    assert_eq!(points[10]["count"], 1);
    assert_eq!(points[14]["count"], 1);
    let total: u64 = points.iter().map(|p| p["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_daily_series_monday_to_sunday() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    let response = server
        .get(&format!("/datasets/{}/aggregates/daily", id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let points = body["table"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0]["day"], "Monday");
    assert_eq!(points[6]["day"], "Sunday");
    assert_eq!(points[0]["count"], 1);
    assert_eq!(points[6]["count"], 1);
}

#[tokio::test]
async fn test_gender_count_and_ratio_modes() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    // Default mode is count: fraud rows only.
    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/gender", id))
        .await
        .json();
    assert_eq!(body["chart"], "bar");
    assert_eq!(body["table"]["mode"], "count");
    let entries = body["table"]["entries"].as_array().unwrap();
    assert_eq!(entries[0]["label"], "M");
    assert_eq!(entries[0]["count"], 1);
    assert_eq!(entries[1]["label"], "F");
    assert_eq!(entries[1]["count"], 1);

    // Ratio mode: fraud/legit pairs covering every row.
    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/gender?mode=ratio", id))
        .await
        .json();
    assert_eq!(body["chart"], "split");
    assert_eq!(body["table"]["mode"], "ratio");
    let entries = body["table"]["entries"].as_array().unwrap();
    let total: u64 = entries
        .iter()
        .map(|e| e["fraud"].as_u64().unwrap() + e["legit"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_age_group_brackets() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/age-group?mode=ratio", id))
        .await
        .json();
    let entries = body["table"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    // Teens: the 2004-born legit row. Adults: the 1990-born fraud row.
    // Seniors: the 1950-born fraud row.
    assert_eq!(entries[0]["label"], "Teens");
    assert_eq!(entries[0]["fraud"], 0);
    assert_eq!(entries[0]["legit"], 1);
    assert_eq!(entries[1]["label"], "Adults");
    assert_eq!(entries[1]["fraud"], 1);
    assert_eq!(entries[2]["label"], "Seniors");
    assert_eq!(entries[2]["fraud"], 1);
}

#[tokio::test]
async fn test_state_table_ranking() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/state", id))
        .await
        .json();
    assert_eq!(body["chart"], "table");
    let entries = body["table"]["entries"].as_array().unwrap();
    assert_eq!(entries[0]["state"], "CA");
    assert_eq!(entries[0]["ratio"], 1.0);
    assert_eq!(entries[1]["state"], "TX");
    assert_eq!(entries[1]["ratio"], 0.0);
}

#[tokio::test]
async fn test_city_population_scatter_fraud_only() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    let body: serde_json::Value = server
        .get(&format!("/datasets/{}/aggregates/city-population", id))
        .await
        .json();
    assert_eq!(body["chart"], "scatter");
    let points = body["table"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert!(points
        .iter()
        .all(|p| p["city_pop"].as_u64().unwrap() == 120000));
}

/// The same request twice returns the same table: no hidden state.
#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let id = upload(&server).await;

    for dimension in ["hourly", "daily", "gender", "age-group", "state"] {
        let url = format!("/datasets/{}/aggregates/{}", id, dimension);
        let first: serde_json::Value = server.get(&url).await.json();
        let second: serde_json::Value = server.get(&url).await.json();
        assert_eq!(first, second, "{} changed between requests", dimension);
    }
}

/// The navigation surface lists every aggregation entry point.
#[tokio::test]
async fn test_sections_enumerate_dimensions() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let body: serde_json::Value = server.get("/sections").await.json();
    let sections = body.as_array().unwrap();
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0]["name"], "Dataset Information");
    assert_eq!(sections[1]["name"], "Time-Based Analysis");

    let all_dimensions: Vec<&str> = sections
        .iter()
        .flat_map(|s| s["dimensions"].as_array().unwrap())
        .map(|d| d["dimension"].as_str().unwrap())
        .collect();
    assert_eq!(
        all_dimensions,
        [
            "hourly",
            "daily",
            "gender",
            "age-group",
            "state",
            "city-population"
        ]
    );
}
