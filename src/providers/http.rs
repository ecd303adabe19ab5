use super::util::with_retry;
use crate::core::config::FeedConfig;
use crate::core::{FeedFetcher, FeedResponse, FetchError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// [`FeedFetcher`] backed by a shared `reqwest` client.
pub struct HttpFeedFetcher {
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl HttpFeedFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, config.retries, config.retry_delay_ms))
    }

    pub fn with_client(client: reqwest::Client, retries: usize, retry_delay_ms: u64) -> Self {
        Self {
            client,
            retries,
            retry_delay_ms,
        }
    }
}

fn fetch_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_builder() {
        FetchError::Unexpected(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn get(&self, url: &str) -> std::result::Result<FeedResponse, FetchError> {
        let response = with_retry(
            || async { self.client.get(url).send().await },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(fetch_error)?;

        let status = response.status();
        debug!(%status, "Received feed response");

        let body = response.bytes().await.map_err(fetch_error)?;
        Ok(FeedResponse::new(status.as_u16(), body.to_vec()))
    }
}
