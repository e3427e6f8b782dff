//! Handlers for the GraphQL proxy endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::dto::proxy::ProxyRequest;
use crate::error::AppError;
use crate::state::AppState;

/// How long browsers may reuse a preflight answer, in seconds.
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Answers a CORS preflight.
///
/// # Endpoint
///
/// `OPTIONS /`
///
/// Returns `204 No Content` with `Access-Control-Max-Age: 86400`; the
/// allow-origin/methods/headers fields come from
/// [`crate::api::middleware::cors`]. Never touches the cache or upstream.
pub async fn preflight_handler() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE),
        )],
    )
}

/// Proxies a GraphQL request to upstream, serving from cache when possible.
///
/// # Endpoint
///
/// `POST /` (every other method except `OPTIONS` is handled the same way)
///
/// # Request Body
///
/// ```json
/// { "query": "...", "variables": { "slug": "demo" }, "skipCache": false }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: Upstream envelope, either `{data}` or `{errors}`; the latter is never cached
/// - **400 Bad Request**: `{"error": "Invalid JSON in request"}`
/// - **502 Bad Gateway**: Upstream answered non-2xx
/// - **500 Internal Server Error**: Upstream unreachable or undecodable
pub async fn proxy_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request = ProxyRequest::parse(&body).inspect_err(|e| {
        warn!(error = %e, "Rejecting malformed proxy request");
    })?;

    let skip_cache = request.skips_cache();
    let query = request.into_query();
    info!(
        variables = ?query.variables,
        skip_cache,
        "Received GraphQL request"
    );

    let payload = state
        .proxy_service
        .execute(query, skip_cache)
        .await
        .inspect_err(|e| warn!(error = %e, status = %e.status_code(), "Proxy request failed"))?;

    Ok(Json(payload))
}
