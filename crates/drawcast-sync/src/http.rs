//! HTTP client for the upstream draw-history endpoint.

use std::time::Duration;

use drawcast_core::DrawResult;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};
use tracing::info;

use crate::{DrawSource, FetchError, parse_history};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Longest slice of a non-2xx body kept in [`FetchError::Server`].
pub const MAX_ERROR_BODY: usize = 256;

/// Fetcher settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    /// Upper bound on the whole request, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Single-shot client for the draw-history endpoint.
///
/// No retries: a failed fetch is reported and the next scheduled run tries again.
pub struct DrawClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl DrawClient {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: config.url,
            timeout: config.timeout,
        })
    }

    /// Fetch the newest page of draws.
    pub async fn fetch_history(&self) -> Result<Vec<DrawResult>, FetchError> {
        info!(url = %self.url, "fetching draw history");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;
        let draws = parse_history(&body)?;
        info!(count = draws.len(), "fetched draw history");
        Ok(draws)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Http(err)
        }
    }
}

/// Cut `body` to at most [`MAX_ERROR_BODY`] bytes on a char boundary, marking the cut.
fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body.push('…');
    body
}

#[async_trait::async_trait]
impl DrawSource for DrawClient {
    async fn fetch_recent(&self) -> Result<Vec<DrawResult>, FetchError> {
        self.fetch_history().await
    }
}
