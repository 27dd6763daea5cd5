//! Application layer with the article catalogue and feed services.

/// Compiled-in sample articles.
pub mod sample_articles;
/// Feed services.
pub mod services;

pub use services::FeedService;
