//! HTTP request handlers for proxy endpoints.

pub mod health;
pub mod proxy;

pub use health::health_handler;
pub use proxy::{preflight_handler, proxy_handler};
