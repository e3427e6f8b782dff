//! Cached upstream response entity.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::Value;
use std::time::Duration;

use super::product_query::CacheKey;

/// Lifetime of every cached upstream response.
///
/// Fixed; a request can only opt out of caching, never change this value.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// An error-free upstream payload held by a cache backend.
///
/// Entries are immutable once written. Expiry is enforced by the backend's own
/// freshness rules from `ttl`; nothing scans or evicts entries by hand.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub payload: Value,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(key: CacheKey, payload: Value, ttl: Duration) -> Self {
        Self {
            key,
            payload,
            stored_at: Utc::now(),
            ttl,
        }
    }

    /// Declared time-to-live in whole seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Instant after which the entry is no longer readable.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.stored_at + ChronoDuration::milliseconds(self.ttl.as_millis() as i64)
    }
}
