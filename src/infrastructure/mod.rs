//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image handling (caching, fetching, loading).
pub mod image;
/// Hand-off from background tasks to the UI task.
pub mod ui_queue;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use image::{
    CacheStats, HttpImageFetcher, ImageLoader, ImageLoaderConfig, MemoryImageCache,
    RequestOutcome,
};
pub use ui_queue::{UiHandle, UiQueue, ui_queue};
