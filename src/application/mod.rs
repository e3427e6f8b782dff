//! Application layer services implementing the proxy protocol.
//!
//! # Available Services
//!
//! - [`services::proxy_service::ProxyService`] - Cache lookup, upstream forwarding
//!   and conditional cache writes for GraphQL requests

pub mod services;
