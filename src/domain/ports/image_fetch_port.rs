//! Port definition for fetching image bytes.

use async_trait::async_trait;
use bytes::Bytes;

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching or decoding an image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or non-success status.
    #[error("Network error: {0}")]
    Network(String),
    /// Bytes could not be decoded into an image.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// The single network boundary: fetch bytes for a URL.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Downloads the raw bytes behind `url`.
    async fn fetch(&self, url: &str) -> FetchResult<Bytes>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    /// Scripted fetcher that counts calls per URL.
    #[derive(Default)]
    pub struct MockImageFetcher {
        responses: HashMap<String, FetchResult<Bytes>>,
        calls: parking_lot::Mutex<HashMap<String, usize>>,
        total: AtomicUsize,
        gate: Option<Arc<Semaphore>>,
    }

    impl MockImageFetcher {
        /// Creates a fetcher that fails every URL.
        pub fn new() -> Self {
            Self::default()
        }

        /// Serves `bytes` for `url`.
        #[must_use]
        pub fn with_response(mut self, url: &str, bytes: Vec<u8>) -> Self {
            self.responses.insert(url.to_string(), Ok(Bytes::from(bytes)));
            self
        }

        /// Serves a valid 2x2 PNG for `url`.
        #[must_use]
        pub fn with_png(self, url: &str) -> Self {
            self.with_response(url, png_bytes())
        }

        /// Holds every fetch until the returned gate gets a permit.
        #[must_use]
        pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
            let gate = Arc::new(Semaphore::new(0));
            self.gate = Some(gate.clone());
            (self, gate)
        }

        /// Returns how many fetches were issued for `url`.
        pub fn calls_for(&self, url: &str) -> usize {
            self.calls.lock().get(url).copied().unwrap_or(0)
        }

        /// Returns how many fetches were issued in total.
        pub fn total_calls(&self) -> usize {
            self.total.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageFetchPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> FetchResult<Bytes> {
            *self.calls.lock().entry(url.to_string()).or_insert(0) += 1;
            self.total.fetch_add(1, Ordering::SeqCst);

            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await;
            }

            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network("HTTP 404".to_string())))
        }
    }

    /// Encodes a tiny PNG.
    pub fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(2, 2);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }
}
