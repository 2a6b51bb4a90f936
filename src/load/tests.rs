//! Tests for the load module

use super::*;
use crate::config::TableRoute;
use crate::types::WriteMode;
use pretty_assertions::assert_eq;
use test_case::test_case;

// ============================================================================
// Table Map Tests
// ============================================================================

#[test_case("summary_00000.jsonl", Some("events_raw"))]
#[test_case("summary_04711.jsonl", Some("events_raw"); "high index same table")]
#[test_case("ip_location_results.jsonl", Some("ip_locations"))]
#[test_case("product_ids_to_crawl.jsonl", Some("product_ids_to_crawl"))]
#[test_case("valid_product_ids.jsonl", Some("crawl_product_id"))]
#[test_case("unrelated.jsonl", None)]
fn test_default_table_map(file: &str, expected: Option<&str>) {
    assert_eq!(TableMap::default().resolve(file), expected);
}

#[test]
fn test_resolve_uses_basename_and_lowercases() {
    let map = TableMap::default();
    assert_eq!(
        map.resolve("dataset_export/summary/SUMMARY_00003.jsonl"),
        Some("events_raw")
    );
}

#[test]
fn test_longest_prefix_wins() {
    let map = TableMap::new(vec![
        ("summary".to_string(), "events_raw".to_string()),
        ("summary_archive".to_string(), "events_archive".to_string()),
    ]);
    assert_eq!(map.resolve("summary_archive_00001.jsonl"), Some("events_archive"));
    assert_eq!(map.resolve("summary_00001.jsonl"), Some("events_raw"));
}

#[test]
fn test_from_routes_empty_falls_back_to_builtin() {
    let map = TableMap::from_routes(&[]);
    assert_eq!(map.len(), 4);

    let map = TableMap::from_routes(&[TableRoute {
        prefix: "clicks".to_string(),
        table: "clicks_raw".to_string(),
    }]);
    assert_eq!(map.len(), 1);
    assert_eq!(map.resolve("clicks_00000.jsonl"), Some("clicks_raw"));
}

// ============================================================================
// Chunk Index Tests
// ============================================================================

#[test]
fn test_chunk_index_parses_sequential_names() {
    assert_eq!(chunk_index("summary_00000.jsonl"), Some(0));
    assert_eq!(chunk_index("summary_00042.jsonl"), Some(42));
    assert_eq!(chunk_index("summary_123456.jsonl"), Some(123_456));
}

#[test]
fn test_chunk_index_rejects_non_chunk_names() {
    assert_eq!(chunk_index("summary.jsonl"), None);
    assert_eq!(chunk_index("summary_1.jsonl"), None);
    assert_eq!(chunk_index("summary_00000.csv"), None);
}

// ============================================================================
// REST Loader Tests
// ============================================================================

#[test]
fn test_load_request_single() {
    let request = LoadRequest::single("events_raw", "gs://b/summary_00000.jsonl", WriteMode::Append);
    assert_eq!(request.table, "events_raw");
    assert_eq!(request.source_uris.len(), 1);
    assert!(request.schema.is_none());
}

#[test]
fn test_rest_loader_rejects_invalid_endpoint() {
    assert!(RestBulkLoader::new("not a url", "events").is_err());
}

#[tokio::test]
async fn test_rest_loader_success() {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/load-jobs"))
        .and(body_partial_json(serde_json::json!({
            "dataset": "events",
            "table": "events_raw",
            "write_mode": "append",
            "ignore_unknown_values": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rows_loaded": 12345
        })))
        .mount(&server)
        .await;

    let loader = RestBulkLoader::new(&format!("{}/api", server.uri()), "events").unwrap();
    let outcome = loader
        .load(&LoadRequest::single(
            "events_raw",
            "gs://b/summary_*.jsonl",
            WriteMode::Append,
        ))
        .await
        .unwrap();

    assert_eq!(outcome.table, "events_raw");
    assert_eq!(outcome.rows_loaded, 12345);
}

#[tokio::test]
async fn test_rest_loader_failure_carries_table_and_cause() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/load-jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "schema mismatch on column time_stamp"
        })))
        .mount(&server)
        .await;

    let loader = RestBulkLoader::new(&server.uri(), "events").unwrap();
    let err = loader
        .load(&LoadRequest::single(
            "events_raw",
            "gs://b/summary_00000.jsonl",
            WriteMode::Truncate,
        ))
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("events_raw"));
    assert!(msg.contains("schema mismatch"));
}
