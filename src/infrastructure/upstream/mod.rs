//! Upstream GraphQL API access.

mod http_upstream;

pub use http_upstream::HttpGraphqlUpstream;
