//! HTTP middleware for request processing and protection.
//!
//! Provides CORS headers, rate limiting, and observability middleware.

pub mod cors;
pub mod rate_limit;
pub mod tracing;
