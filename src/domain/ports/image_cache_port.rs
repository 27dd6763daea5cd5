//! Port definition for image caching.

use std::sync::Arc;

/// Port for the decoded-image cache.
///
/// Keyed by the source URL string. Implementations must be thread-safe: the
/// UI thread reads while background fetch tasks write.
pub trait ImageCachePort: Send + Sync {
    /// Returns the cached image for a URL, counting a hit or a miss.
    fn get(&self, url: &str) -> Option<Arc<image::DynamicImage>>;

    /// Stores an image. Writing the same URL twice replaces the entry.
    fn put(&self, url: String, image: Arc<image::DynamicImage>);

    /// Returns true if an entry exists, without touching statistics.
    fn contains(&self, url: &str) -> bool;

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    fn clear(&self);
}
