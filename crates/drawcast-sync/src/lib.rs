//! Result fetcher: the draw-source seam, upstream schema validation, and the HTTP client.

mod error;
pub mod schema;

#[cfg(feature = "http")]
pub mod http;

pub use error::FetchError;
pub use schema::parse_history;

#[cfg(feature = "http")]
pub use http::{DrawClient, FetchConfig};

use drawcast_core::DrawResult;

/// Anything that can produce the latest draws, newest first.
#[async_trait::async_trait]
pub trait DrawSource: Send + Sync {
    async fn fetch_recent(&self) -> Result<Vec<DrawResult>, FetchError>;
}
