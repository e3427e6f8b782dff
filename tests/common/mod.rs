#![allow(dead_code)]

use async_trait::async_trait;
use product_card_proxy::domain::entities::{CacheKey, ProductQuery};
use product_card_proxy::domain::upstream::GraphqlUpstream;
use product_card_proxy::error::AppError;
use product_card_proxy::infrastructure::cache::{CacheResult, CacheService, MemoryCache};
use product_card_proxy::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const POST_QUERY: &str = "query GetPost($slug: String!) { post(slug: $slug) { id name } }";

type Reply = Box<dyn Fn(&ProductQuery) -> Result<Value, AppError> + Send + Sync>;

/// Upstream double answering every query with the same reply and counting calls.
pub struct StubUpstream {
    reply: Reply,
    calls: AtomicUsize,
}

impl StubUpstream {
    pub fn new(
        reply: impl Fn(&ProductQuery) -> Result<Value, AppError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn ok(payload: Value) -> Arc<Self> {
        Self::new(move |_| Ok(payload.clone()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphqlUpstream for StubUpstream {
    async fn execute(&self, query: &ProductQuery) -> Result<Value, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(query)
    }
}

/// Cache backend whose health check always fails.
pub struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<Value>> {
        Ok(None)
    }

    async fn put(&self, _key: &CacheKey, _payload: &Value, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

pub fn post_payload(slug: &str) -> Value {
    json!({ "data": { "post": { "id": "1", "name": slug } } })
}

pub fn proxy_body(slug: &str, skip_cache: bool) -> Value {
    json!({
        "query": POST_QUERY,
        "variables": { "slug": slug },
        "skipCache": skip_cache
    })
}

pub fn create_test_state(upstream: Arc<StubUpstream>) -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new(1_000));
    (AppState::new(cache.clone(), upstream), cache)
}
