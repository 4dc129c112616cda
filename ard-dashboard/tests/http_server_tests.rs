//! HTTP Server & Routing Integration Tests
//! Test File: http_server_tests.rs
//!
//! Exercises the router with `tower::ServiceExt::oneshot`; no socket is
//! bound. Timed flows run on tokio's paused clock.

use ard_common::events::EventBus;
use ard_dashboard::config::TimingConfig;
use ard_dashboard::services::{AcceptList, FileIntake, MockExecutor, ModelCatalog};
use ard_dashboard::workflow::WorkflowController;
use ard_dashboard::{build_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const BOUNDARY: &str = "ard-test-boundary";

/// Router over a fresh session; intake limit 4 KiB so oversize bodies stay small
fn test_app() -> Router {
    let event_bus = EventBus::new(100);
    let controller = WorkflowController::new(
        FileIntake::new(4096, AcceptList::parse("image/*,application/pdf,text/plain")),
        ModelCatalog::builtin(),
        Arc::new(MockExecutor::default()),
        TimingConfig::default(),
        event_bus.clone(),
    );
    build_router(AppState::new(controller, event_bus))
}

fn multipart_request(field: &str, file_name: &str, content_type: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Upload a small text file and let the simulated upload finish
async fn upload_text_file(app: &Router) {
    let (status, body) = send(app, multipart_request("file", "notes.txt", "text/plain", b"hello world")).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["state"], "uploading");
    tokio::time::sleep(Duration::from_millis(3_100)).await;
}

/// TC-HTTP-001: Root route serves the dashboard page
#[tokio::test]
async fn tc_http_001_root_route_serves_html() {
    // Given: Running server
    let app = test_app();

    // When: GET /
    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    // Then: HTML with the configured accept attribute
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains(r#"accept="image/*,application/pdf,text/plain""#));
    assert!(html.contains("/static/dashboard.js"));
    assert!(html.contains(r#"id="drop-zone""#));
}

/// TC-HTTP-002: Static assets are served with their content types
#[tokio::test]
async fn tc_http_002_static_assets() {
    let app = test_app();

    let js = app.clone().oneshot(empty_request("GET", "/static/dashboard.js")).await.unwrap();
    assert_eq!(js.status(), StatusCode::OK);
    assert_eq!(js.headers()["content-type"], "application/javascript");

    let js = js.into_body().collect().await.unwrap().to_bytes();
    let js = String::from_utf8(js.to_vec()).unwrap();
    assert!(js.contains("addEventListener('drop'"));
    assert!(js.contains("'/api/upload'"));

    let css = app.oneshot(empty_request("GET", "/static/dashboard.css")).await.unwrap();
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(css.headers()["content-type"], "text/css");
    let css = css.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8(css.to_vec()).unwrap().contains(".drop-zone.drag-active"));
}

/// TC-HTTP-003: Health endpoint reports module identity
#[tokio::test]
async fn tc_http_003_health() {
    let app = test_app();

    let (status, body) = send(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ard-dashboard");
    assert!(body.get("last_error").is_none());
}

/// TC-HTTP-004: Catalog grouped by category in first-seen order
#[tokio::test]
async fn tc_http_004_models_grouped() {
    let app = test_app();

    let (status, body) = send(&app, empty_request("GET", "/api/models")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_count"], 5);
    let categories: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Text Processing", "Computer Vision", "Data Analysis"]);
    assert_eq!(body["categories"][0]["models"][1]["id"], "sentiment-analysis");
}

/// TC-HTTP-005: Fresh session is idle with the run trigger disabled
#[tokio::test]
async fn tc_http_005_initial_session() {
    let app = test_app();

    let (status, body) = send(&app, empty_request("GET", "/api/session")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "idle");
    assert_eq!(body["status_message"], "Waiting to start");
    assert_eq!(body["can_run"], false);
    assert!(body["displayed_progress"].is_null());
}

/// TC-HTTP-006: Oversize upload rejected with 422 FILE_TOO_LARGE
#[tokio::test]
async fn tc_http_006_oversize_upload() {
    let app = test_app();

    let (status, body) = send(
        &app,
        multipart_request("file", "big.txt", "text/plain", &vec![b'x'; 8192]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "FILE_TOO_LARGE");

    let (_, session) = send(&app, empty_request("GET", "/api/session")).await;
    assert_eq!(session["state"], "idle");
}

/// TC-HTTP-007: Unsupported type rejected with 422 UNSUPPORTED_TYPE
#[tokio::test]
async fn tc_http_007_unsupported_type_upload() {
    let app = test_app();

    let (status, body) = send(&app, multipart_request("file", "clip.mp4", "video/mp4", b"data")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_TYPE");
}

/// TC-HTTP-008: Multipart body without a `file` part is a bad request
#[tokio::test]
async fn tc_http_008_upload_without_file_field() {
    let app = test_app();

    let (status, body) = send(&app, multipart_request("attachment", "a.txt", "text/plain", b"x")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

/// TC-HTTP-009: Run without selection is 400 MISSING_SELECTION
#[tokio::test]
async fn tc_http_009_run_without_selection() {
    let app = test_app();

    let (status, body) = send(&app, empty_request("POST", "/api/run")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_SELECTION");
}

/// TC-HTTP-010: Model selection and clearing
#[tokio::test]
async fn tc_http_010_select_and_clear_model() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/model", json!({ "model_id": "image-classification" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected_model"], "image-classification");
    assert_eq!(body["selected_model_detail"]["category"], "Computer Vision");

    let (status, body) = send(&app, empty_request("DELETE", "/api/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["selected_model"].is_null());
}

/// TC-HTTP-011: Full flow through upload, run and results
#[tokio::test(start_paused = true)]
async fn tc_http_011_full_flow() {
    // Given: an uploaded text file and text-analysis selected
    let app = test_app();
    upload_text_file(&app).await;
    let (_, session) = send(&app, empty_request("GET", "/api/session")).await;
    assert_eq!(session["state"], "idle");
    assert_eq!(session["file"]["name"], "notes.txt");
    assert_eq!(session["file"]["size_bytes"], 11);

    send(
        &app,
        json_request("POST", "/api/model", json!({ "model_id": "text-analysis" })),
    )
    .await;

    // When: a run is requested
    let (status, body) = send(&app, empty_request("POST", "/api/run")).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["state"], "processing");

    // Then: a second run is refused while processing
    let (status, body) = send(&app, empty_request("POST", "/api/run")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    // And: results are partitioned once complete
    tokio::time::sleep(Duration::from_millis(2_100)).await;
    let (_, session) = send(&app, empty_request("GET", "/api/session")).await;
    assert_eq!(session["state"], "complete");
    assert_eq!(session["displayed_progress"], 100.0);
    assert_eq!(session["status_message"], "Processing complete!");

    let (status, results) = send(&app, empty_request("GET", "/api/results")).await;
    assert_eq!(status, StatusCode::OK);
    let ids = |key: &str| -> Vec<String> {
        results[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(ids("visual"), vec!["sentiment", "keywords"]);
    assert_eq!(ids("detailed"), vec!["sentiment", "keywords", "text-details"]);
    assert_eq!(results["visual"][0]["render"], "pie");
    assert_eq!(results["visual"][0]["labels"][0], "Positive: 72%");
    assert_eq!(results["detailed"][2]["render"], "raw-text");
    assert!(results["detailed"][2]["text"].as_str().unwrap().contains("Word Count"));
}

/// TC-HTTP-012: SSE stream opens with a connection frame
#[tokio::test]
async fn tc_http_012_event_stream_connects() {
    let app = test_app();

    let response = app.oneshot(empty_request("GET", "/events")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    assert!(text.contains("event: ConnectionStatus"));
    assert!(text.contains("data: connected"));
}
