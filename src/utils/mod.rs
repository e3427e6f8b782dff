//! Helper functions shared by the proxy and the fetch client.
//!
//! - [`slug`] - Product identifier normalization

pub mod slug;
