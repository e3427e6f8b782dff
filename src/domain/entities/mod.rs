//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ProductQuery`] - A GraphQL query template plus bound variables
//! - [`CacheKey`] - Deterministic index derived from a [`ProductQuery`]
//! - [`CacheEntry`] - A cached upstream payload with its declared TTL
//! - [`ProductRecord`] - Normalized product data returned to callers

pub mod cache_entry;
pub mod product_query;
pub mod product_record;

pub use cache_entry::{CACHE_TTL, CacheEntry};
pub use product_query::{CacheKey, ProductQuery};
pub use product_record::{ProductRecord, UpstreamMedia, UpstreamProduct};
