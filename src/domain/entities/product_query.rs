//! GraphQL query entity and the cache key derived from it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Matches any run of whitespace in query text.
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Namespace prefix for every cache key.
const CACHE_KEY_PREFIX: &str = "ph_api_";

/// A GraphQL query template plus its bound variables.
///
/// Serializes to the `{ "query": ..., "variables": ... }` body the upstream
/// API expects. Variables are kept in a [`BTreeMap`] so their serialization
/// is canonical (keys sorted) regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(rename = "query")]
    pub query_signature: String,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
}

impl ProductQuery {
    /// Creates a query from its text and variables.
    pub fn new(query_signature: impl Into<String>, variables: BTreeMap<String, Value>) -> Self {
        Self {
            query_signature: query_signature.into(),
            variables,
        }
    }

    /// Creates a query bound to a single `slug` variable.
    pub fn with_slug(query_signature: impl Into<String>, slug: &str) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("slug".to_string(), Value::String(slug.to_string()));
        Self::new(query_signature, variables)
    }

    /// Derives the cache key for this query.
    ///
    /// The key concatenates the canonical JSON serialization of the variables
    /// with the query text stripped of all whitespace, so formatting changes
    /// in the query template do not produce a new key.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let query = ProductQuery::with_slug("query { post(slug: $slug) { id } }", "demo");
    /// assert_eq!(
    ///     query.cache_key().as_str(),
    ///     r#"ph_api_{"slug":"demo"}_query{post(slug:$slug){id}}"#
    /// );
    /// ```
    pub fn cache_key(&self) -> CacheKey {
        let variables = serde_json::to_string(&self.variables).unwrap_or_default();
        let compact_query = WHITESPACE_REGEX.replace_all(&self.query_signature, "");

        CacheKey(format!("{CACHE_KEY_PREFIX}{variables}_{compact_query}"))
    }
}

/// Deterministic index for a cached upstream response.
///
/// No uniqueness guarantee is made across different queries beyond using both
/// the query text and the variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
