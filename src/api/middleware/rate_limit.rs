//! Rate limiting middleware using token bucket algorithm.
//!
//! Every proxied request spends the upstream credential's quota, so the
//! proxy route is limited per client IP.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Token bucket parameters for the proxy route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Interval, in seconds, after which one request of quota is restored.
    pub replenish_seconds: u64,
    /// Requests a client may send in a burst.
    pub burst: u32,
}

/// Creates a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Returns `None` when the settings are rejected by governor (a zero interval
/// or burst); [`crate::config::Config::validate`] rules those out at startup.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the router must be served with connect info.
///
/// # Example
///
/// ```rust,ignore
/// let settings = RateLimitSettings { replenish_seconds: 1, burst: 100 };
/// let app = Router::new()
///     .route("/", post(proxy_handler))
///     .layer(rate_limit::layer(settings).unwrap());
/// ```
pub fn layer(
    settings: RateLimitSettings,
) -> Option<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(settings.replenish_seconds)
        .burst_size(settings.burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}
