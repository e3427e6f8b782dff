//! Cache service trait and error types.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::domain::entities::CacheKey;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store for upstream GraphQL responses.
///
/// Freshness belongs to the backend: `put` declares a TTL and a later `get`
/// past that TTL simply misses. Implementations must be safe for concurrent
/// use; callers perform no locking of their own. A racing duplicate `put`
/// for the same key is harmless, last write wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process moka cache with per-entry TTL
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache shared across instances
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up a cached payload.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))` on a fresh hit
    /// - `Ok(None)` on a miss, an expired entry, or a backend error (fail-open)
    ///
    /// # Errors
    ///
    /// Should not return errors in production implementations. Errors are logged
    /// and treated as cache misses.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Value>>;

    /// Stores a payload under `key` for `ttl`.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log errors
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn put(&self, key: &CacheKey, payload: &Value, ttl: Duration) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
