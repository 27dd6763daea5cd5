//! Zoomfeed - A terminal news feed with zoom transitions.
//!
//! This crate provides an article feed whose cards zoom into a full-screen
//! detail view that can be dismissed by dragging it down, backed by an
//! asynchronous image loader with an in-memory cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the article catalogue and feed services.
pub mod application;
/// Domain layer containing entities, the transition state machine, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "zoomfeed";
