mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{routing::get, Router};
use axum_test::TestServer;
use serde_json::Value;

use linktrack::api::handlers::health_handler;

use common::{create_test_state, InMemoryClicks, InMemoryLinks};

fn health_app(state: linktrack::AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_health_ok() {
    let links = Arc::new(InMemoryLinks::new());
    links.insert("one", "https://example.com", None);
    // keep the receiver alive so the click queue reports a consumer
    let (state, _rx) = create_test_state(links, Arc::new(InMemoryClicks::new()));
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["click_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_database_unavailable() {
    let links = Arc::new(InMemoryLinks::new());
    links.fail_lookups.store(true, Ordering::SeqCst);
    let (state, _rx) = create_test_state(links, Arc::new(InMemoryClicks::new()));
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let links = Arc::new(InMemoryLinks::new());
    let (state, rx) = create_test_state(links, Arc::new(InMemoryClicks::new()));
    drop(rx);
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["checks"]["click_queue"]["status"], "error");
}
