//! reqwest client for the upstream GraphQL API.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::domain::entities::ProductQuery;
use crate::domain::upstream::GraphqlUpstream;
use crate::error::{AppError, map_reqwest_error};

/// Longest slice of an upstream body copied into logs.
const LOG_BODY_LIMIT: usize = 500;

/// Forwards queries to the upstream API with the bearer credential attached.
///
/// Only `{query, variables}` is sent; client headers and the `skipCache`
/// flag never reach upstream.
pub struct HttpGraphqlUpstream {
    client: reqwest::Client,
    endpoint: String,
    token: SecretString,
}

impl HttpGraphqlUpstream {
    /// Builds a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

fn truncate_for_log(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[async_trait]
impl GraphqlUpstream for HttpGraphqlUpstream {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn execute(&self, query: &ProductQuery) -> Result<Value, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.token.expose_secret())
            .header(ACCEPT, "application/json")
            .json(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let response_text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %truncate_for_log(&response_text),
                "Upstream API returned non-success status"
            );
            return Err(AppError::upstream(status.as_u16(), response_text));
        }

        debug!(status = %status, bytes = response_text.len(), "Upstream API responded");

        serde_json::from_str(&response_text).map_err(|e| {
            error!(
                error = %e,
                body = %truncate_for_log(&response_text),
                "Failed to parse upstream GraphQL response"
            );
            AppError::internal(format!("Invalid JSON from upstream API: {e}"))
        })
    }
}
