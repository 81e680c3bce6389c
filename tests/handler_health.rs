mod common;

use common::{FailingStore, memory_store, promo_link};
use slug_redirector::config::Config;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _rx) = common::create_test_server(Config::default(), memory_store([promo_link()]));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["access_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (server, _rx) = common::create_test_server(Config::default(), common::empty_store());

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("store").is_some());
    assert!(json["checks"].get("access_queue").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_store_down() {
    let (server, _rx) = common::create_test_server(Config::default(), Arc::new(FailingStore));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}

#[tokio::test]
async fn test_health_degraded_when_queue_closed() {
    let (state, rx) = common::create_test_state(Config::default(), common::empty_store());
    drop(rx);
    let server = common::server_for(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["access_queue"]["status"], "error");
}

#[tokio::test]
async fn test_health_is_not_shadowed_by_links() {
    let store = memory_store([slug_redirector::domain::entities::Link::new(
        "health",
        "https://dest.example/h",
    )]);
    let (server, _rx) = common::create_test_server(Config::default(), store);

    server.get("/health").await.assert_status_ok();
}
