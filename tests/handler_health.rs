mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{StubUpstream, UnreachableCache, create_test_state, post_payload};
use product_card_proxy::routes::app_router;
use product_card_proxy::state::AppState;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _cache) = create_test_state(StubUpstream::ok(post_payload("demo")));
    let server = TestServer::new(app_router(state, None)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "Backend: memory");
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let state = AppState::new(
        Arc::new(UnreachableCache),
        StubUpstream::ok(post_payload("demo")),
    );
    let server = TestServer::new(app_router(state, None)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cache"]["status"], "error");
    assert_eq!(json["checks"]["cache"]["backend"], "redis");
}
