//! DTO for the GraphQL proxy request body.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

use crate::domain::entities::ProductQuery;
use crate::error::AppError;

/// Body accepted by `POST /`.
///
/// ```json
/// { "query": "query GetPost($slug: String!) { ... }", "variables": { "slug": "demo" }, "skipCache": true }
/// ```
///
/// `variables` may be absent or `null`. Only a literal `true` in `skipCache`
/// disables caching; any other value leaves it on.
#[derive(Debug, Deserialize, Validate)]
pub struct ProxyRequest {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,

    #[serde(default)]
    pub variables: Option<BTreeMap<String, Value>>,

    #[serde(default, rename = "skipCache")]
    pub skip_cache: Value,
}

impl ProxyRequest {
    /// Decodes and validates a raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedRequest`] if the body is not JSON, lacks
    /// a string `query`, or the query is empty.
    pub fn parse(body: &[u8]) -> Result<Self, AppError> {
        let request: Self =
            serde_json::from_slice(body).map_err(|e| AppError::malformed(e.to_string()))?;

        request
            .validate()
            .map_err(|e| AppError::malformed(e.to_string()))?;

        Ok(request)
    }

    /// Whether the caller asked to bypass the cache.
    pub fn skips_cache(&self) -> bool {
        self.skip_cache == Value::Bool(true)
    }

    /// The GraphQL query to forward.
    pub fn into_query(self) -> ProductQuery {
        ProductQuery::new(self.query, self.variables.unwrap_or_default())
    }
}
