//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::CacheKey;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis cache shared by every proxy instance pointing at the same server.
///
/// Uses `ConnectionManager` for connection reuse. Expiry is delegated to
/// Redis via `SET ... EX`. All operations are fail-open: errors are logged
/// but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "gql:".to_string(),
        })
    }

    /// Constructs the Redis key for a cache key.
    ///
    /// Cache keys embed the whole query text, so they are hashed to keep
    /// Redis keys short and uniform.
    fn build_key(&self, key: &CacheKey) -> String {
        build_redis_key(&self.key_prefix, key)
    }
}

fn build_redis_key(prefix: &str, key: &CacheKey) -> String {
    let digest = Sha256::digest(key.as_str().as_bytes());
    format!("{}{}", prefix, hex::encode(digest))
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Value>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&redis_key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(payload) => {
                    debug!(key = %redis_key, "Cache HIT");
                    Ok(Some(payload))
                }
                Err(e) => {
                    warn!(key = %redis_key, error = %e, "Discarding undecodable cache entry");
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!(key = %redis_key, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", redis_key, e);
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &CacheKey, payload: &Value, ttl: Duration) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let raw = serde_json::to_string(payload)?;
        let ttl_seconds = ttl.as_secs().max(1);
        let mut conn = self.client.clone();

        match conn.set_ex::<_, _, ()>(&redis_key, raw, ttl_seconds).await {
            Ok(_) => {
                debug!(key = %redis_key, ttl_seconds, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", redis_key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
