//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for caching and upstream access.
//!
//! # Modules
//!
//! - [`cache`] - Response cache backends (moka, Redis, no-op)
//! - [`upstream`] - reqwest client for the upstream GraphQL API

pub mod cache;
pub mod upstream;
