//! Data Transfer Objects for proxy requests and responses.
//!
//! Request bodies are decoded with Serde and checked with validator.

pub mod health;
pub mod proxy;
