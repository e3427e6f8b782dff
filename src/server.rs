//! HTTP server initialization and runtime setup.
//!
//! Handles cache backend selection, the upstream client, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::upstream::HttpGraphqlUpstream;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Picks the cache backend described by the configuration.
///
/// Redis is preferred when configured; if it cannot be reached the in-memory
/// cache takes over so responses are still cached.
async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    if !config.cache_enabled {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    }

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            }
        }
    }

    tracing::info!(
        capacity = config.cache_max_capacity,
        "Cache enabled (in-memory)"
    );
    Arc::new(MemoryCache::new(config.cache_max_capacity))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Cache backend (Redis, in-memory, or NullCache)
/// - Upstream GraphQL client
/// - Axum HTTP server, until Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache = build_cache(&config).await;

    let upstream = HttpGraphqlUpstream::new(
        config.upstream_url.clone(),
        config.upstream_token.clone(),
        Duration::from_secs(config.upstream_timeout_seconds),
    )
    .context("Failed to build upstream HTTP client")?;

    let state = AppState::new(cache, Arc::new(upstream));
    let app = app_router(state, config.rate_limit());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config() -> Config {
        Config {
            listen_addr: "127.0.0.1:0".to_string(),
            upstream_url: "http://127.0.0.1:9/graphql".to_string(),
            upstream_token: SecretString::from("token"),
            upstream_timeout_seconds: 1,
            cache_enabled: true,
            redis_url: None,
            cache_max_capacity: 100,
            rate_limit_enabled: false,
            rate_limit_replenish_seconds: 1,
            rate_limit_burst: 1,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[tokio::test]
    async fn test_disabled_cache_uses_null_backend() {
        let mut config = config();
        config.cache_enabled = false;

        assert_eq!(build_cache(&config).await.backend(), "disabled");
    }

    #[tokio::test]
    async fn test_default_cache_is_in_memory() {
        assert_eq!(build_cache(&config()).await.backend(), "memory");
    }
}
