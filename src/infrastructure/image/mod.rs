//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching, unbounded or LRU-bounded
//! - HTTP fetching behind the fetch port
//! - Async image loading pipeline

pub mod http_fetcher;
pub mod loader;
pub mod memory_cache;

pub use http_fetcher::HttpImageFetcher;
pub use loader::{ImageLoader, ImageLoaderConfig, RequestOutcome};
pub use memory_cache::{CacheStats, MemoryImageCache};
