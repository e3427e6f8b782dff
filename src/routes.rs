//! Router configuration.
//!
//! # Route Structure
//!
//! - `OPTIONS /`     - CORS preflight, 204
//! - `POST /`        - GraphQL proxy (any other method on `/` is proxied too)
//! - `GET  /health`  - Health check: cache backend
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive headers on every response
//! - **Rate limiting** - Per-IP token bucket on proxied requests only (optional)

use crate::api::handlers::{health_handler, preflight_handler, proxy_handler};
use crate::api::middleware::rate_limit::{self, RateLimitSettings};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limits for proxied requests; `None` disables
///   limiting. When enabled, the router must be served with
///   `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// The limiter wraps only the proxy endpoints. The preflight endpoint is
/// registered after the layer, so `OPTIONS /` never spends quota and never
/// answers 429.
pub fn app_router(state: AppState, rate_limit: Option<RateLimitSettings>) -> Router {
    let mut proxy = post(proxy_handler).fallback(proxy_handler);

    if let Some(settings) = rate_limit {
        match rate_limit::layer(settings) {
            Some(limiter) => proxy = proxy.layer(limiter),
            None => ::tracing::warn!(?settings, "Invalid rate limit settings; limiting disabled"),
        }
    }

    Router::new()
        .route("/", proxy.options(preflight_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(middleware::from_fn(cors::layer))
        .layer(tracing::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upstream::MockGraphqlUpstream;
    use crate::infrastructure::cache::NullCache;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::json;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let mut upstream = MockGraphqlUpstream::new();
        upstream
            .expect_execute()
            .returning(|_| Ok(json!({ "data": { "post": null } })));

        AppState::new(Arc::new(NullCache::new()), Arc::new(upstream))
    }

    fn proxy_request() -> Request<Body> {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query":"query { x }","variables":{}}"#))
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 4000))));
        request
    }

    #[tokio::test]
    async fn test_rate_limit_rejects_burst_overflow() {
        let app = app_router(
            state(),
            Some(RateLimitSettings {
                replenish_seconds: 60,
                burst: 1,
            }),
        );

        let first = app.clone().oneshot(proxy_request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(proxy_request()).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(second.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    fn preflight_request() -> Request<Body> {
        let mut request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 4000))));
        request
    }

    #[tokio::test]
    async fn test_preflight_does_not_spend_quota() {
        let app = app_router(
            state(),
            Some(RateLimitSettings {
                replenish_seconds: 60,
                burst: 1,
            }),
        );

        let preflight = app.clone().oneshot(preflight_request()).await.unwrap();
        assert_eq!(preflight.status(), StatusCode::NO_CONTENT);

        let proxied = app.clone().oneshot(proxy_request()).await.unwrap();
        assert_eq!(proxied.status(), StatusCode::OK);

        // Bucket is now empty; preflight still answers.
        let preflight = app.oneshot(preflight_request()).await.unwrap();
        assert_eq!(preflight.status(), StatusCode::NO_CONTENT);
        assert_eq!(preflight.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[tokio::test]
    async fn test_other_methods_are_proxied_and_limited() {
        let app = app_router(
            state(),
            Some(RateLimitSettings {
                replenish_seconds: 60,
                burst: 1,
            }),
        );

        let mut put = proxy_request();
        *put.method_mut() = Method::PUT;
        let response = app.clone().oneshot(put).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut delete = proxy_request();
        *delete.method_mut() = Method::DELETE;
        let response = app.oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_health_is_not_rate_limited() {
        let app = app_router(
            state(),
            Some(RateLimitSettings {
                replenish_seconds: 60,
                burst: 1,
            }),
        );

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(Request::get("/health").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
