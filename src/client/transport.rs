//! Client side of the proxy HTTP contract.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::error::FetchError;
use crate::domain::entities::ProductQuery;

/// Bound on each individual shape attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends one query to the proxy and returns the decoded response envelope.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProxyTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] on network failure or timeout,
    /// [`FetchError::Status`] on a non-2xx answer, and [`FetchError::Decode`]
    /// when the body is not JSON.
    async fn send(&self, query: &ProductQuery, skip_cache: bool) -> Result<Value, FetchError>;
}

/// Request body accepted by the proxy: `{query, variables, skipCache}`.
#[derive(Serialize)]
struct ProxyBody<'a> {
    #[serde(flatten)]
    query: &'a ProductQuery,
    #[serde(rename = "skipCache")]
    skip_cache: bool,
}

/// reqwest-backed transport to a running proxy.
pub struct HttpProxyTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpProxyTransport {
    /// Builds a transport for the proxy at `endpoint` using [`REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ProxyTransport for HttpProxyTransport {
    async fn send(&self, query: &ProductQuery, skip_cache: bool) -> Result<Value, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProxyBody { query, skip_cache })
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, endpoint = %self.endpoint, "Proxy responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
