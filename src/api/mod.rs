//! HTTP layer for the GraphQL proxy.
//!
//! Translates HTTP requests into [`crate::application::services::ProxyService`]
//! calls and formats responses, always with permissive CORS headers.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS, tracing and rate limiting

pub mod dto;
pub mod handlers;
pub mod middleware;
