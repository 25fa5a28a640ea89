/// Motivational quote sources
///
/// This module defines the contract for fetching one motivational quote.
/// The contract is infallible: a source absorbs every upstream failure
/// into a fixed fallback quote, so callers never see an error page because
/// a third-party API is down.
///
/// # Implementations
///
/// - `ZenQuotesClient`: HTTP client for the zenquotes.io API
/// - `StaticQuotes`: fixed quote, for tests and offline demos

pub mod zenquotes;

pub use zenquotes::ZenQuotesClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fallback when the upstream request times out
pub const TIMEOUT_FALLBACK: &str = "The request timed out. Please try again later.";

/// Fallback for any other network-level failure
pub const NETWORK_FALLBACK: &str = "Could not fetch quote. Please check your connection.";

/// Fallback for everything else, including a malformed response body
pub const GENERIC_FALLBACK: &str = "Something went wrong. Please try again later.";

/// A motivational quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text
    pub text: String,

    /// Author, empty on fallback responses
    pub author: String,
}

impl Quote {
    /// Creates a quote
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Creates a fallback quote with an empty author
    pub fn fallback(text: &str) -> Self {
        Self::new(text, "")
    }
}

/// A source of motivational quotes
///
/// `fetch` never fails; implementations downgrade upstream failures to
/// fallback quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches one quote
    async fn fetch(&self) -> Quote;
}

/// Quote source that always returns the same quote
///
/// Useful for tests and for running the server without network access.
#[derive(Debug, Clone)]
pub struct StaticQuotes {
    quote: Quote,
}

impl StaticQuotes {
    /// Creates a static source with the given quote
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: Quote::new(text, author),
        }
    }
}

#[async_trait]
impl QuoteSource for StaticQuotes {
    async fn fetch(&self) -> Quote {
        self.quote.clone()
    }
}
