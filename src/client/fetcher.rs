//! Product fetch orchestration: query-shape fallback inside bounded retries.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::error::FetchError;
use super::retry::{RetriesExhausted, Sleeper, TokioSleeper, default_backoff, retry_with_backoff};
use super::shapes::{QUERY_SHAPES, QueryShape};
use super::transport::ProxyTransport;
use crate::domain::entities::ProductRecord;
use crate::utils::slug::DEFAULT_IDENTIFIER;

/// Obtains a [`ProductRecord`] from the proxy for a product slug.
///
/// Each attempt walks [`QUERY_SHAPES`] strictly in order and stops at the first
/// shape that yields a product. A round in which every shape fails is retried
/// on the backoff schedule.
pub struct ProductFetcher {
    transport: Arc<dyn ProxyTransport>,
    sleeper: Arc<dyn Sleeper>,
    backoff: Vec<Duration>,
}

impl ProductFetcher {
    /// Creates a fetcher that sleeps on the tokio timer with the default schedule.
    pub fn new(transport: Arc<dyn ProxyTransport>) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            backoff: default_backoff().collect(),
        }
    }

    /// Replaces the sleeper used between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Fetches product data for `identifier`.
    ///
    /// The identifier is trimmed and an empty one is replaced by
    /// [`DEFAULT_IDENTIFIER`]. URLs are not resolved here; see
    /// [`crate::utils::slug::normalize_identifier`].
    ///
    /// With `skip_cache` the proxy neither reads nor writes its cache.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidInput`] if the identifier has no printable
    /// characters at all, and [`FetchError::FetchFailed`] wrapping the last round's
    /// failure once every attempt is used up.
    #[instrument(skip(self), fields(slug = tracing::field::Empty))]
    pub async fn fetch_product_data(
        &self,
        identifier: &str,
        skip_cache: bool,
    ) -> Result<ProductRecord, FetchError> {
        let slug = match identifier.trim() {
            "" => DEFAULT_IDENTIFIER,
            s if s.chars().all(char::is_control) => {
                return Err(FetchError::InvalidInput(s.to_string()));
            }
            s => s,
        };
        tracing::Span::current().record("slug", slug);

        retry_with_backoff(self.backoff.iter().copied(), self.sleeper.as_ref(), |attempt| {
            info!(attempt, "Fetching product data");
            self.fetch_round(slug, skip_cache)
        })
        .await
        .map_err(|RetriesExhausted { attempts, last }| {
            warn!(attempts, error = %last, "Giving up on product data");
            FetchError::FetchFailed {
                attempts,
                source: Box::new(last),
            }
        })
    }

    /// Tries every shape once, in order.
    async fn fetch_round(&self, slug: &str, skip_cache: bool) -> Result<ProductRecord, FetchError> {
        let mut last_error = None;

        for shape in &QUERY_SHAPES {
            match self.try_shape(shape, slug, skip_cache).await {
                Ok(record) => {
                    info!(
                        shape = shape.name,
                        name = %record.name,
                        votes = record.votes_count,
                        comments = record.comments_count,
                        "Product found"
                    );
                    return Ok(record);
                }
                Err(e) => {
                    warn!(shape = shape.name, error = %e, "Query shape failed");
                    last_error = Some(e);
                }
            }
        }

        Err(FetchError::AllShapesFailed {
            last: Box::new(last_error.unwrap_or(FetchError::MissingData { path: "" })),
        })
    }

    async fn try_shape(
        &self,
        shape: &QueryShape,
        slug: &str,
        skip_cache: bool,
    ) -> Result<ProductRecord, FetchError> {
        let envelope = self
            .transport
            .send(&shape.query_for(slug), skip_cache)
            .await?;

        shape.extract(&envelope)
    }
}
