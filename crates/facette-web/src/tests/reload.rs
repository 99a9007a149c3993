use std::fs;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use facette_core::{ConfigOverrides, ServerConfig};

use super::harness::{TestHarness, body_text, decode_json};

const DATA: &str = r#"{
    "catalog": {
        "origins": [
            { "name": "prometheus", "sources": [ { "name": "node-exporter", "metrics": ["up"] } ] }
        ]
    },
    "library": {
        "collections": [ { "id": "nodes", "name": "Nodes" } ]
    }
}"#;

fn config_with_data(path: std::path::PathBuf) -> ServerConfig {
    ServerConfig::load(
        None,
        ConfigOverrides {
            data_path: Some(path),
            ..ConfigOverrides::default()
        },
    )
    .expect("config")
}

#[tokio::test]
async fn reload_swaps_catalog_and_library_for_later_requests() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("data.json");
    fs::write(&path, DATA).expect("write data");
    let harness = TestHarness::with_config(config_with_data(path));

    let before = body_text(harness.get("/browse/search?q=node").await).await;
    assert!(before.contains("0 result(s)"));

    let response = harness.get("/reload").await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = body_text(harness.get("/browse/search?q=node").await).await;
    assert!(after.contains("2 result(s)"));
    assert!(after.contains("node-exporter"));

    let stats: Value = decode_json(harness.get("/stats").await).await;
    assert_eq!(stats["Origins"], 1);
    assert_eq!(stats["Collections"], 1);
    assert_eq!(stats["Graphs"], 0);
}

#[tokio::test]
async fn reload_without_data_file_keeps_current_state() {
    let harness = TestHarness::setup();
    let response = harness.get("/reload").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(harness.state.library.collection_count(), 2);
}

#[tokio::test]
async fn reload_failure_is_internal_error_with_generic_body() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("data.json");
    fs::write(&path, "{ not json").expect("write data");
    let harness = TestHarness::with_config(config_with_data(path));

    let response = harness.get("/reload").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload: Value = decode_json(response).await;
    assert_eq!(payload["message"], "internal server error");
    assert!(payload["trace_id"].is_string());
    assert_eq!(harness.state.catalog.origin_count(), 2);
}

#[tokio::test]
async fn reload_rejects_non_read_methods() {
    let harness = TestHarness::setup();
    let response = harness.send(Method::POST, "/reload").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
