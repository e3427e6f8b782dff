//! GraphQL proxy service: cache lookup, upstream forwarding, cache write.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::entities::{CACHE_TTL, ProductQuery};
use crate::domain::upstream::GraphqlUpstream;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Mediates between untrusted clients and the credentialed upstream API.
///
/// Holds no per-request state; any number of calls may run concurrently.
/// The cache is the only shared mutable resource and guards itself.
pub struct ProxyService {
    cache: Arc<dyn CacheService>,
    upstream: Arc<dyn GraphqlUpstream>,
}

impl ProxyService {
    /// Creates a new proxy service.
    pub fn new(cache: Arc<dyn CacheService>, upstream: Arc<dyn GraphqlUpstream>) -> Self {
        Self { cache, upstream }
    }

    /// Resolves a query, from cache when possible.
    ///
    /// # Request Flow
    ///
    /// 1. Unless `skip_cache`, look up the query's cache key; a hit is returned verbatim
    /// 2. Forward `{query, variables}` upstream
    /// 3. A payload carrying GraphQL `errors` is returned but never cached
    /// 4. Unless `skip_cache`, store the error-free payload for [`CACHE_TTL`]
    ///
    /// Cache failures never fail the request: a read error is a miss and a
    /// write error is logged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] if upstream answers non-2xx.
    /// Returns [`AppError::Internal`] if upstream cannot be reached or decoded.
    pub async fn execute(&self, query: ProductQuery, skip_cache: bool) -> Result<Value, AppError> {
        let cache_key = (!skip_cache).then(|| query.cache_key());

        if let Some(key) = &cache_key {
            match self.cache.get(key).await {
                Ok(Some(payload)) => {
                    info!(backend = self.cache.backend(), "Serving response from cache");
                    return Ok(payload);
                }
                Ok(None) => debug!("Cache miss, forwarding upstream"),
                Err(e) => warn!(error = %e, "Cache read failed, forwarding upstream"),
            }
        } else {
            debug!("Cache skipped by request");
        }

        let payload = self.upstream.execute(&query).await?;

        if carries_graphql_errors(&payload) {
            warn!(errors = %payload["errors"], "Upstream returned GraphQL errors; not caching");
            return Ok(payload);
        }

        if let Some(key) = &cache_key
            && let Err(e) = self.cache.put(key, &payload, CACHE_TTL).await
        {
            warn!(error = %e, "Failed to cache upstream response");
        }

        Ok(payload)
    }
}

/// Whether a GraphQL envelope reports logical errors.
///
/// Any non-null `errors` member counts, including an empty array.
pub fn carries_graphql_errors(payload: &Value) -> bool {
    payload.get("errors").is_some_and(|errors| !errors.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upstream::MockGraphqlUpstream;
    use crate::infrastructure::cache::{MemoryCache, NullCache};
    use serde_json::json;

    fn query(slug: &str) -> ProductQuery {
        ProductQuery::with_slug("query GetPost($slug: String!) { post(slug: $slug) { id } }", slug)
    }

    fn post_payload() -> Value {
        json!({ "data": { "post": { "id": "1", "name": "Demo" } } })
    }

    fn service(mock: MockGraphqlUpstream, cache: Arc<dyn CacheService>) -> ProxyService {
        ProxyService::new(cache, Arc::new(mock))
    }

    #[tokio::test]
    async fn test_miss_forwards_and_caches() {
        let mut mock = MockGraphqlUpstream::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(post_payload()));

        let cache = Arc::new(MemoryCache::new(100));
        let service = service(mock, cache.clone());

        let first = service.execute(query("demo"), false).await.unwrap();
        let second = service.execute(query("demo"), false).await.unwrap();

        assert_eq!(first, post_payload());
        assert_eq!(second, post_payload());
        assert_eq!(
            cache.get(&query("demo").cache_key()).await.unwrap(),
            Some(post_payload())
        );
    }

    #[tokio::test]
    async fn test_hit_skips_upstream() {
        let mut mock = MockGraphqlUpstream::new();
        mock.expect_execute().never();

        let cache = Arc::new(MemoryCache::new(100));
        let cached = json!({ "data": { "post": { "id": "cached" } } });
        cache
            .put(&query("demo").cache_key(), &cached, CACHE_TTL)
            .await
            .unwrap();

        let result = service(mock, cache)
            .execute(query("demo"), false)
            .await
            .unwrap();

        assert_eq!(result, cached);
    }

    #[tokio::test]
    async fn test_skip_cache_bypasses_lookup_and_write() {
        let mut mock = MockGraphqlUpstream::new();
        mock.expect_execute()
            .times(2)
            .returning(|_| Ok(post_payload()));

        let cache = Arc::new(MemoryCache::new(100));
        cache
            .put(&query("demo").cache_key(), &json!({ "data": "stale" }), CACHE_TTL)
            .await
            .unwrap();
        let service = service(mock, cache.clone());

        assert_eq!(service.execute(query("demo"), true).await.unwrap(), post_payload());
        assert_eq!(service.execute(query("demo"), true).await.unwrap(), post_payload());

        assert_eq!(
            cache.get(&query("demo").cache_key()).await.unwrap(),
            Some(json!({ "data": "stale" }))
        );
    }

    #[tokio::test]
    async fn test_graphql_errors_are_returned_but_not_cached() {
        let error_payload = json!({ "errors": [{ "message": "Field 'post' doesn't exist" }] });
        let returned = error_payload.clone();

        let mut mock = MockGraphqlUpstream::new();
        mock.expect_execute()
            .times(2)
            .returning(move |_| Ok(returned.clone()));

        let cache = Arc::new(MemoryCache::new(100));
        let service = service(mock, cache.clone());

        assert_eq!(service.execute(query("demo"), false).await.unwrap(), error_payload);
        assert!(
            cache
                .get(&query("demo").cache_key())
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(service.execute(query("demo"), false).await.unwrap(), error_payload);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_and_is_not_cached() {
        let mut mock = MockGraphqlUpstream::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(AppError::upstream(503, "down")));

        let cache = Arc::new(MemoryCache::new(100));
        let result = service(mock, cache.clone())
            .execute(query("demo"), false)
            .await;

        assert!(matches!(
            result,
            Err(AppError::UpstreamUnavailable { status: 503, .. })
        ));
        assert!(
            cache
                .get(&query("demo").cache_key())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_forwards_query_unchanged() {
        let mut mock = MockGraphqlUpstream::new();
        mock.expect_execute()
            .withf(|q| q.variables.get("slug") == Some(&json!("voltops")))
            .times(1)
            .returning(|_| Ok(post_payload()));

        let result = service(mock, Arc::new(NullCache::new()))
            .execute(query("voltops"), false)
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_carries_graphql_errors() {
        assert!(carries_graphql_errors(&json!({ "errors": [{ "message": "x" }] })));
        assert!(carries_graphql_errors(&json!({ "errors": [] })));
        assert!(!carries_graphql_errors(&json!({ "errors": null, "data": {} })));
        assert!(!carries_graphql_errors(&json!({ "data": { "post": null } })));
    }
}
