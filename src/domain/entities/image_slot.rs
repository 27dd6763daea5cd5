//! Domain types for image loading.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUESTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one request site (a card, a hero image, a related card).
///
/// Completions are routed back by requester so that a late result for a view
/// that no longer exists can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequesterId(u64);

impl RequesterId {
    /// Allocates a fresh, process-unique requester id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_REQUESTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for RequesterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Status of an image slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// Nothing to show yet, or no URL at all.
    #[default]
    Placeholder,
    /// A fetch issued by this slot is in flight.
    Loading,
    /// Image is decoded and ready for display.
    Ready,
    /// The last fetch failed. Rendered exactly like the placeholder.
    Failed(String),
}

impl ImageStatus {
    /// Returns true if the image is ready for rendering.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns true if a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the last fetch failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true if a placeholder should be drawn.
    #[must_use]
    pub const fn shows_placeholder(&self) -> bool {
        !self.is_ready()
    }
}

/// Completion of a background fetch, delivered on the UI queue.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// The request site the fetch was issued for.
    pub requester: RequesterId,
    /// Source URL.
    pub url: String,
    /// Decoded image, or the failure reason.
    pub result: Result<Arc<image::DynamicImage>, String>,
}

/// Per-call-site request state.
///
/// Owns the in-flight flag: a slot never issues a second fetch while one it
/// started is still pending.
#[derive(Clone)]
pub struct ImageSlot {
    requester: RequesterId,
    url: Option<String>,
    image: Option<Arc<image::DynamicImage>>,
    status: ImageStatus,
    in_flight: bool,
}

impl ImageSlot {
    /// Creates a slot for an optional URL.
    #[must_use]
    pub fn new(url: Option<String>) -> Self {
        Self {
            requester: RequesterId::next(),
            url,
            image: None,
            status: ImageStatus::Placeholder,
            in_flight: false,
        }
    }

    /// Returns the requester id of this slot.
    #[must_use]
    pub const fn requester(&self) -> RequesterId {
        self.requester
    }

    /// Returns the source URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the decoded image, if ready.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<image::DynamicImage>> {
        self.image.as_ref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &ImageStatus {
        &self.status
    }

    /// Returns true while a fetch issued by this slot is pending.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Marks a fetch as issued.
    pub fn mark_in_flight(&mut self) {
        self.in_flight = true;
        self.status = ImageStatus::Loading;
    }

    /// Stores a ready image.
    pub fn set_ready(&mut self, image: Arc<image::DynamicImage>) {
        self.image = Some(image);
        self.status = ImageStatus::Ready;
        self.in_flight = false;
    }

    /// Applies a completion event. Returns true if the event belonged to this
    /// slot.
    pub fn apply(&mut self, event: &ImageLoadedEvent) -> bool {
        if event.requester != self.requester || self.url.as_deref() != Some(event.url.as_str()) {
            return false;
        }

        self.in_flight = false;
        match &event.result {
            Ok(image) => self.set_ready(image.clone()),
            Err(reason) => {
                if !self.status.is_ready() {
                    self.status = ImageStatus::Failed(reason.clone());
                }
            }
        }
        true
    }
}

impl std::fmt::Debug for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSlot")
            .field("requester", &self.requester)
            .field("url", &self.url)
            .field("has_image", &self.image.is_some())
            .field("status", &self.status)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
