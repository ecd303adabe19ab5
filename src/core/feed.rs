//! Transport abstraction for downloading a rate feed.

use async_trait::async_trait;

/// Raw HTTP answer from a feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FeedResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Unexpected(String),
}

/// Performs a single GET. Implementations must not retry on behalf of the
/// rate provider unless configured to at the transport level.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FeedResponse, FetchError>;
}
