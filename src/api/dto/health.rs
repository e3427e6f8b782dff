//! Body of `GET /health`.

use serde::Serialize;

/// Overall verdict, serialized as `"healthy"` or `"degraded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Outcome of one probe, serialized as `"ok"` or `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    Ok,
    Error,
}

/// Result of pinging the configured cache backend.
#[derive(Debug, Serialize)]
pub struct CacheProbe {
    pub status: ProbeOutcome,
    pub backend: &'static str,
    pub message: String,
}

impl CacheProbe {
    pub fn new(backend: &'static str, reachable: bool) -> Self {
        if reachable {
            Self {
                status: ProbeOutcome::Ok,
                backend,
                message: format!("Backend: {backend}"),
            }
        } else {
            Self {
                status: ProbeOutcome::Error,
                backend,
                message: format!("Backend {backend} is unreachable"),
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Probes {
    pub cache: CacheProbe,
}

/// `{"status", "version", "checks": {"cache": {...}}}`
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub checks: Probes,
}

impl HealthReport {
    /// The proxy is healthy exactly when its cache backend answers.
    pub fn from_cache(cache: CacheProbe) -> Self {
        let status = match cache.status {
            ProbeOutcome::Ok => HealthStatus::Healthy,
            ProbeOutcome::Error => HealthStatus::Degraded,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: Probes { cache },
        }
    }
}
