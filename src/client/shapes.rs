//! The alternative query shapes tried against the proxy, in priority order.
//!
//! Upstream exposes the same product under several schemas. Each shape pairs
//! a query with the JSON pointer at which its node lives in the response.

use serde_json::Value;

use super::error::FetchError;
use crate::domain::entities::{ProductQuery, ProductRecord, UpstreamProduct};

const POST_QUERY: &str = r#"
  query GetPost($slug: String!) {
    post(slug: $slug) {
      id
      name
      tagline
      description
      url
      thumbnail {
        url
      }
      media {
        type
        url
        videoUrl
      }
      votesCount
      commentsCount
    }
  }
"#;

const SEARCH_QUERY: &str = r#"
  query SearchPosts($slug: String!) {
    posts(first: 1, order: RANKING, search: $slug) {
      edges {
        node {
          id
          name
          tagline
          description
          url
          thumbnail {
            url
          }
          media {
            type
            url
            videoUrl
          }
          votesCount
          commentsCount
        }
      }
    }
  }
"#;

const PRODUCT_QUERY: &str = r#"
  query GetProduct($slug: String!) {
    product(slug: $slug) {
      id
      name
      tagline
      description
      website
      thumbnail {
        url
      }
      media {
        type
        url
        videoUrl
      }
      votesCount
      commentsCount
    }
  }
"#;

/// One strategy for locating a product.
#[derive(Debug, Clone, Copy)]
pub struct QueryShape {
    pub name: &'static str,
    pub query: &'static str,
    /// JSON pointer to the product node in the response envelope.
    pub data_path: &'static str,
}

/// Shapes in the order they are attempted.
pub const QUERY_SHAPES: [QueryShape; 3] = [
    QueryShape {
        name: "post",
        query: POST_QUERY,
        data_path: "/data/post",
    },
    QueryShape {
        name: "search",
        query: SEARCH_QUERY,
        data_path: "/data/posts/edges/0/node",
    },
    QueryShape {
        name: "product",
        query: PRODUCT_QUERY,
        data_path: "/data/product",
    },
];

impl QueryShape {
    /// Binds this shape's query to a slug.
    pub fn query_for(&self, slug: &str) -> ProductQuery {
        ProductQuery::with_slug(self.query, slug)
    }

    /// Pulls the product out of a response envelope.
    ///
    /// # Errors
    ///
    /// - [`FetchError::GraphQl`] if the envelope carries a non-null `errors` field
    /// - [`FetchError::MissingData`] if any level of the data path is absent or null
    /// - [`FetchError::Decode`] if the node is not a product object
    pub fn extract(&self, envelope: &Value) -> Result<ProductRecord, FetchError> {
        if let Some(errors) = envelope.get("errors")
            && !errors.is_null()
        {
            return Err(FetchError::GraphQl(summarize_errors(errors)));
        }

        let node = envelope
            .pointer(self.data_path)
            .filter(|node| !node.is_null())
            .ok_or(FetchError::MissingData {
                path: self.data_path,
            })?;

        if !node.is_object() {
            return Err(FetchError::Decode(format!(
                "expected an object at {}, got {node}",
                self.data_path
            )));
        }

        let product: UpstreamProduct = serde_json::from_value(node.clone())
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(product.into())
    }
}

/// Joins `errors[].message` with `"; "`.
fn summarize_errors(errors: &Value) -> String {
    match errors.as_array() {
        Some(list) => list
            .iter()
            .map(|e| match e.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => e.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        None => errors.to_string(),
    }
}
