/// HTTP client for the zenquotes.io random-quote API
///
/// Issues one GET with a bounded timeout and no retries. The upstream
/// returns a JSON array whose first element carries the quote in `q` and
/// the author in `a`:
///
/// ```json
/// [{"q": "The obstacle is the way.", "a": "Marcus Aurelius", ...}]
/// ```
///
/// Every failure resolves to one of three fixed fallback quotes rather
/// than an error: a timeout, any other network-level failure, and
/// everything else (non-2xx aside, a malformed or empty body).

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{Quote, QuoteSource, GENERIC_FALLBACK, NETWORK_FALLBACK, TIMEOUT_FALLBACK};

/// One element of the upstream response array
#[derive(Debug, Deserialize)]
struct ZenQuote {
    /// Quote text
    q: String,

    /// Author
    a: String,
}

/// Why a fetch attempt failed, keyed to its fallback quote
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request timed out")]
    TimedOut,

    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    fn fallback(&self) -> Quote {
        match self {
            FetchError::TimedOut => Quote::fallback(TIMEOUT_FALLBACK),
            FetchError::Network(_) => Quote::fallback(NETWORK_FALLBACK),
            FetchError::Malformed(_) => Quote::fallback(GENERIC_FALLBACK),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::TimedOut
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Quote source backed by the zenquotes.io API
pub struct ZenQuotesClient {
    client: reqwest::Client,
    url: String,
}

impl ZenQuotesClient {
    /// Creates a client for the given endpoint with a request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn try_fetch(&self) -> Result<Quote, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        let response = response.error_for_status()?;

        let quotes: Vec<ZenQuote> = response.json().await?;
        let first = quotes
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("empty quote array".to_string()))?;

        Ok(Quote::new(first.q, first.a))
    }
}

#[async_trait]
impl QuoteSource for ZenQuotesClient {
    async fn fetch(&self) -> Quote {
        match self.try_fetch().await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!("Quote fetch failed: {}", e);
                e.fallback()
            }
        }
    }
}
