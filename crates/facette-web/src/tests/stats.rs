use axum::http::{Method, StatusCode};
use serde_json::Value;

use facette_core::Source;

use super::harness::{TestHarness, decode_json};

#[tokio::test]
async fn stats_reports_distinct_cardinalities() {
    let harness = TestHarness::setup();
    let response = harness.get("/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload: Value = decode_json(response).await;
    assert_eq!(payload["Origins"], 2);
    assert_eq!(payload["Sources"], 2);
    assert_eq!(payload["Metrics"], 4);
    assert_eq!(payload["Graphs"], 2);
    assert_eq!(payload["Collections"], 2);
    assert_eq!(payload["Groups"], 1);
}

#[tokio::test]
async fn stats_are_recomputed_per_request() {
    let harness = TestHarness::setup();
    harness.state.catalog.insert_source(
        "influx",
        Source::new("db1.example.net", "").with_metrics(["queries"]),
    );
    let payload: Value = decode_json(harness.get("/stats").await).await;
    assert_eq!(payload["Origins"], 3);
    assert_eq!(payload["Sources"], 3);
    assert_eq!(payload["Metrics"], 5);
}

#[tokio::test]
async fn stats_rejects_writes_with_json_message() {
    let harness = TestHarness::setup();
    let response = harness.send(Method::POST, "/stats").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let payload: Value = decode_json(response).await;
    assert_eq!(payload["message"], "method not allowed");
}
