//! `GET /health`.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CacheProbe, HealthReport, HealthStatus};
use crate::state::AppState;

/// Reports whether the cache backend is reachable.
///
/// Answers **200 OK** when it is and **503 Service Unavailable** otherwise,
/// with the same body either way:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "cache": { "status": "ok", "backend": "memory", "message": "Backend: memory" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let probe = CacheProbe::new(state.cache.backend(), state.cache.health_check().await);
    let report = HealthReport::from_cache(probe);

    let code = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(report))
}
