//! Product fetch client.
//!
//! Talks to the proxy the way the product card editor does: it tries several
//! query shapes per round and retries whole rounds with exponential backoff.
//!
//! ```rust,ignore
//! let transport = Arc::new(HttpProxyTransport::new("http://localhost:3000")?);
//! let record = ProductFetcher::new(transport)
//!     .fetch_product_data("voltops", true)
//!     .await?;
//! ```

pub mod error;
pub mod fetcher;
pub mod retry;
pub mod shapes;
pub mod transport;

pub use error::FetchError;
pub use fetcher::ProductFetcher;
pub use retry::{Sleeper, TokioSleeper, retry_with_backoff};
pub use shapes::{QUERY_SHAPES, QueryShape};
pub use transport::{HttpProxyTransport, ProxyTransport};
