//! Permissive CORS headers for every response.

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Methods browsers may use against the proxy.
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Request headers browsers may send to the proxy.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Adds permissive CORS headers to the response.
///
/// Runs on every response, including error envelopes and rate-limit
/// rejections, so a browser can always read why a request failed.
///
/// # Headers
///
/// ```text
/// Access-Control-Allow-Origin: *
/// Access-Control-Allow-Methods: GET, POST, OPTIONS
/// Access-Control-Allow-Headers: Content-Type, Authorization
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", post(proxy_handler))
///     .layer(middleware::from_fn(cors::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
