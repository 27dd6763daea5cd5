//! Async image loading orchestrator.
//!
//! Memory cache first, then the network. Fetches run as detached tokio tasks
//! and report back through the UI queue; nothing here cancels them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{ImageLoadedEvent, ImageSlot, RequesterId};
use crate::domain::ports::{FetchError, FetchResult, ImageCachePort, ImageFetchPort};
use crate::infrastructure::ui_queue::UiHandle;

/// Configuration for the image loader.
#[derive(Debug, Clone, Default)]
pub struct ImageLoaderConfig {
    /// Share one pending fetch between every requester of the same URL.
    /// When false, each request site only guards against its own duplicates.
    pub single_flight: bool,
    /// Decoded images wider than this are downscaled before caching.
    pub max_decode_width: Option<u32>,
}

/// What a call to [`ImageLoader::request`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// No URL; the placeholder is permanent.
    Placeholder,
    /// Served synchronously from the memory cache.
    Ready,
    /// This request site already has a fetch pending.
    InFlight,
    /// A new fetch was issued.
    Started,
    /// Joined a fetch another request site already issued.
    Attached,
}

type PendingRegistry = Arc<Mutex<HashMap<String, Vec<RequesterId>>>>;

/// Resolves image slots against the cache and the network.
pub struct ImageLoader {
    cache: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetchPort>,
    ui: UiHandle<ImageLoadedEvent>,
    pending: PendingRegistry,
    config: ImageLoaderConfig,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    /// Creates a loader over an explicitly owned cache and fetcher.
    #[must_use]
    pub fn new(
        config: ImageLoaderConfig,
        cache: Arc<dyn ImageCachePort>,
        fetcher: Arc<dyn ImageFetchPort>,
        ui: UiHandle<ImageLoadedEvent>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            ui,
            pending: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ImageLoaderConfig {
        &self.config
    }

    /// Resolves `slot`: placeholder for no URL, the cached image if present,
    /// otherwise a background fetch unless one is already pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&self, slot: &mut ImageSlot) -> RequestOutcome {
        let Some(url) = slot.url().map(str::to_owned) else {
            return RequestOutcome::Placeholder;
        };

        if let Some(image) = self.cache.get(&url) {
            slot.set_ready(image);
            return RequestOutcome::Ready;
        }

        if slot.is_in_flight() {
            return RequestOutcome::InFlight;
        }

        slot.mark_in_flight();
        let requester = slot.requester();

        if self.config.single_flight {
            let mut pending = self.pending.lock();
            if let Some(waiters) = pending.get_mut(&url) {
                debug!(url = %url, requester = %requester, "Attaching to pending fetch");
                waiters.push(requester);
                return RequestOutcome::Attached;
            }
            pending.insert(url.clone(), vec![requester]);
        }

        self.spawn_fetch(requester, url);
        RequestOutcome::Started
    }

    /// Number of URLs with a shared fetch pending. Always zero unless
    /// single-flight is enabled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    fn spawn_fetch(&self, requester: RequesterId, url: String) {
        let cache = self.cache.clone();
        let fetcher = self.fetcher.clone();
        let ui = self.ui.clone();
        let pending = self.config.single_flight.then(|| self.pending.clone());
        let max_width = self.config.max_decode_width;

        debug!(url = %url, requester = %requester, "Starting image fetch");

        tokio::spawn(async move {
            let result = fetch_and_decode(fetcher.as_ref(), &url, max_width).await;

            match &result {
                Ok(image) => {
                    cache.put(url.clone(), image.clone());
                    info!(url = %url, width = image.width(), height = image.height(), "Image loaded");
                }
                Err(e) => warn!(url = %url, error = %e, "Image load failed"),
            }

            let requesters = match pending {
                Some(pending) => pending.lock().remove(&url).unwrap_or_default(),
                None => vec![requester],
            };

            let result = result.map_err(|e| e.to_string());
            for requester in requesters {
                ui.post(ImageLoadedEvent {
                    requester,
                    url: url.clone(),
                    result: result.clone(),
                });
            }
        });
    }
}

async fn fetch_and_decode(
    fetcher: &dyn ImageFetchPort,
    url: &str,
    max_width: Option<u32>,
) -> FetchResult<Arc<image::DynamicImage>> {
    let bytes = fetcher.fetch(url).await?;

    let decoded = tokio::task::spawn_blocking(move || -> FetchResult<image::DynamicImage> {
        let img = image::load_from_memory(&bytes)
            .map_err(|e| FetchError::Decode(format!("Failed to decode image: {e}")))?;

        match max_width {
            Some(max) if img.width() > max => {
                Ok(img.resize(max, u32::MAX, image::imageops::FilterType::Triangle))
            }
            _ => Ok(img),
        }
    })
    .await
    .map_err(|e| FetchError::Decode(format!("Decode task panicked: {e}")))??;

    Ok(Arc::new(decoded))
}
