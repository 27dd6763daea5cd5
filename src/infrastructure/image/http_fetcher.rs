//! HTTP adapter for [`ImageFetchPort`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::domain::ports::{FetchError, FetchResult, ImageFetchPort};

/// Fetches image bytes over HTTP with default request headers.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher. `timeout` of `None` waits indefinitely.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Option<Duration>) -> FetchResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Bytes> {
        debug!(url, "Downloading image");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        assert!(HttpImageFetcher::new(None).is_ok());
        assert!(HttpImageFetcher::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_network_error() {
        let fetcher = HttpImageFetcher::new(None).expect("client");
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
