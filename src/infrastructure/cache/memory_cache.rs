//! In-process cache backed by moka.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::{CacheEntry, CacheKey};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// Expiration policy reading the TTL declared on each [`CacheEntry`].
struct EntryExpiry;

impl Expiry<CacheKey, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // A rewrite starts a fresh TTL instead of inheriting the old deadline.
        Some(value.ttl)
    }
}

/// Bounded in-memory cache local to one proxy instance.
///
/// Reads of an entry past its TTL miss even before moka's background
/// maintenance has evicted it.
pub struct MemoryCache {
    cache: Cache<CacheKey, CacheEntry>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_capacity` entries.
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { cache }
    }

    /// Number of live entries after pending maintenance has run.
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Value>> {
        match self.cache.get(key).await {
            Some(entry) => {
                debug!(key = %key, stored_at = %entry.stored_at, "Cache HIT");
                Ok(Some(entry.payload))
            }
            None => {
                debug!(key = %key, "Cache MISS");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &CacheKey, payload: &Value, ttl: Duration) -> CacheResult<()> {
        let entry = CacheEntry::new(key.clone(), payload.clone(), ttl);
        debug!(key = %key, expires_at = %entry.expires_at(), "Cache SET");

        self.cache.insert(key.clone(), entry).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
