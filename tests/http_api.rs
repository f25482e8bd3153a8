//! HTTP API Tests
//!
//! In-process requests against the axum router:
//! - POST /analyze returns the alternative set
//! - Failures map to 400 / 503 with a JSON error body
//! - /health and /metrics report server state

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use planlens::analysis::PlanAnalyzer;
use planlens::http_server::{HttpServer, HttpServerConfig};
use planlens::session::{CatalogSessions, PlanCatalog, SessionProvider};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

const QUERY: &str = "SELECT c_name FROM customer ORDER BY c_acctbal DESC";

fn catalog() -> PlanCatalog {
    PlanCatalog::new()
        .with_plan(
            QUERY,
            &[],
            json!([{"Plan": {
                "Node Type": "Sort", "Total Cost": 2350.7, "Sort Key": ["c_acctbal DESC"],
                "Plans": [{"Node Type": "Seq Scan", "Relation Name": "customer",
                           "Alias": "customer", "Total Cost": 512.0}]}}]),
        )
        .with_plan(
            QUERY,
            &["enable_seqscan", "enable_sort"],
            json!([{"Plan": {
                "Node Type": "Index Scan", "Scan Direction": "Backward",
                "Index Name": "customer_acctbal_idx", "Relation Name": "customer",
                "Alias": "customer", "Total Cost": 3120.4}}]),
        )
}

fn router_with(provider: Arc<dyn SessionProvider>) -> Router {
    HttpServer::with_config(HttpServerConfig::default(), provider, PlanAnalyzer::new()).router()
}

fn router() -> Router {
    router_with(Arc::new(CatalogSessions::from_catalog(catalog())))
}

fn post_analyze(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Analyze Tests
// =============================================================================

#[tokio::test]
async fn test_analyze_returns_alternatives() {
    let response = router().oneshot(post_analyze(json!({"query": QUERY}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let plans = body["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0]["plan"]["Node Type"], "Sort");
    assert_eq!(plans[0]["summary"]["node_count"], 2);
    assert_eq!(plans[1]["plan"]["Node Type"], "Index Scan");
    assert_eq!(body["query"], QUERY);
}

#[tokio::test]
async fn test_sort_narration_reads_direction() {
    let response = router().oneshot(post_analyze(json!({"query": QUERY}))).await.unwrap();
    let body = json_body(response).await;

    // Reversed level order: the scan first, the sort last
    let narration = body["plans"][0]["narration"].as_array().unwrap();
    assert!(narration[0].as_str().unwrap().contains("Sequential Scan"));
    assert!(narration[1].as_str().unwrap().contains("descending order"));
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let response = router().oneshot(post_analyze(json!({"query": ""}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "No query provided!");
    assert_eq!(body["code"], "PLANLENS_INVALID_QUERY");
}

#[tokio::test]
async fn test_missing_query_field_is_bad_request() {
    let response = router().oneshot(post_analyze(json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_query_is_bad_request() {
    let response = router()
        .oneshot(post_analyze(json!({"query": "SELEC 1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid SQL query!");
    assert_eq!(body["kind"], "invalid_query");
}

#[tokio::test]
async fn test_unreachable_planner_is_unavailable() {
    let provider = Arc::new(CatalogSessions::from_path("/nonexistent/plans.json"));
    let response = router_with(provider)
        .oneshot(post_analyze(json!({"query": QUERY})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = json_body(response).await;
    assert_eq!(body["code"], "PLANLENS_UNAVAILABLE");
}

// =============================================================================
// Observability Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = router().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_metrics_count_analyses() {
    let app = router();

    let response = app
        .clone()
        .oneshot(post_analyze(json!({"query": QUERY})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    let metrics = json_body(response).await;
    assert_eq!(metrics["analyses_completed"], 1);
    assert_eq!(metrics["probes_issued"], 2);
    assert_eq!(metrics["alternatives_accepted"], 1);
}
