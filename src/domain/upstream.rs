//! Trait for the credentialed upstream GraphQL API.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::ProductQuery;
use crate::error::AppError;

/// Forwards a GraphQL query to the upstream API.
///
/// Implementations attach the secret credential themselves; callers never see
/// it and never pass client headers through.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::HttpGraphqlUpstream`] - reqwest implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphqlUpstream: Send + Sync {
    /// Sends `{query, variables}` upstream and returns the decoded JSON body.
    ///
    /// A body carrying a GraphQL `errors` array is still `Ok`: deciding what
    /// to do with logical errors belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] if upstream answers with a
    /// non-2xx status.
    ///
    /// Returns [`AppError::Internal`] if the request cannot be sent or the
    /// body is not valid JSON.
    async fn execute(&self, query: &ProductQuery) -> Result<Value, AppError>;
}
