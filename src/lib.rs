//! # Product Card Proxy
//!
//! A caching GraphQL edge proxy for a product catalog API, plus the client
//! that fetches product cards through it.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Query, cache entry and product entities; the upstream trait
//! - **Application Layer** ([`application`]) - Cache lookup, forwarding and conditional cache writes
//! - **Infrastructure Layer** ([`infrastructure`]) - Cache backends and the upstream HTTP client
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware (CORS, tracing, rate limiting)
//! - **Client** ([`client`]) - Product fetch orchestration with query fallback and retries
//!
//! ## Features
//!
//! - Holds the upstream bearer credential so browsers never see it
//! - Caches error-free responses for five minutes (moka or Redis)
//! - Permissive CORS on every response, including errors
//! - Per-IP rate limiting and structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! export UPSTREAM_API_TOKEN="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! # Start the proxy
//! cargo run
//!
//! # Fetch a product card through it
//! cargo run --bin fetch -- https://www.producthunt.com/products/demodazzle
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ProxyService;
    pub use crate::client::{FetchError, HttpProxyTransport, ProductFetcher};
    pub use crate::domain::entities::{CacheKey, ProductQuery, ProductRecord};
    pub use crate::domain::upstream::GraphqlUpstream;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
