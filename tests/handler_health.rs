mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use linkis::api::handlers::health_handler;
use serde_json::Value;

#[tokio::test]
async fn test_health_without_database_pool() {
    let app = common::create_test_app();
    let router = Router::new()
        .route("/health", get(health_handler))
        .with_state(app.state);
    let server = TestServer::new(router).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "skipped");
    assert_eq!(body["checks"]["click_queue"]["status"], "ok");
    assert_eq!(body["checks"]["cache"]["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let app = common::create_test_app();
    drop(app.clicks);
    let router = Router::new()
        .route("/health", get(health_handler))
        .with_state(app.state);
    let server = TestServer::new(router).unwrap();

    let response = server.get("/health").await;

    response.assert_status_service_unavailable();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["click_queue"]["status"], "error");
}
