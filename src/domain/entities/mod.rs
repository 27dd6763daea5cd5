//! Domain entity definitions.

mod article;
mod image_slot;

pub use article::{Article, ArticleId, Highlight, HighlightTone, Section};
pub use image_slot::{ImageLoadedEvent, ImageSlot, ImageStatus, RequesterId};
