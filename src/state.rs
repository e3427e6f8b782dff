use std::sync::Arc;

use crate::application::services::ProxyService;
use crate::domain::upstream::GraphqlUpstream;
use crate::infrastructure::cache::CacheService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub proxy_service: Arc<ProxyService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the proxy service to a cache backend and an upstream client.
    pub fn new(cache: Arc<dyn CacheService>, upstream: Arc<dyn GraphqlUpstream>) -> Self {
        Self {
            proxy_service: Arc::new(ProxyService::new(cache.clone(), upstream)),
            cache,
        }
    }
}
