//! Domain layer: the data the proxy and the fetch client exchange.
//!
//! # Architecture
//!
//! - [`entities`] - Queries, cache keys, cache entries and normalized product records
//! - [`upstream`] - The seam to the credentialed upstream GraphQL API
//!
//! The domain layer has no dependency on HTTP frameworks or cache backends.
//! Concrete upstream and cache implementations live in
//! [`crate::infrastructure`].

pub mod entities;
pub mod upstream;
