use thiserror::Error;

/// Failures of the product fetch client.
///
/// Everything except [`FetchError::FetchFailed`] describes a single attempt:
/// one query shape or one round of shapes. Those are recovered from by falling
/// back and retrying; only `FetchFailed` reaches the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid product identifier: {0:?}")]
    InvalidInput(String),

    #[error("Proxy request failed: {0}")]
    Transport(String),

    #[error("Proxy returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("No product at {path}")]
    MissingData { path: &'static str },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("All query shapes failed, last error: {last}")]
    AllShapesFailed {
        #[source]
        last: Box<FetchError>,
    },

    #[error("Failed to fetch product data after {attempts} attempts: {source}")]
    FetchFailed {
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Transport(format!("request timed out: {e}"))
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_fetch_failed_wraps_last_cause() {
        let err = FetchError::FetchFailed {
            attempts: 3,
            source: Box::new(FetchError::AllShapesFailed {
                last: Box::new(FetchError::GraphQl("Not found".to_string())),
            }),
        };

        assert_eq!(
            err.to_string(),
            "Failed to fetch product data after 3 attempts: \
             All query shapes failed, last error: GraphQL errors: Not found"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_status_message() {
        let err = FetchError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };

        assert_eq!(err.to_string(), "Proxy returned 502: bad gateway");
    }
}
