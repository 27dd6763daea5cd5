//! Domain layer with core entities, the transition state machine, and port
//! definitions.

/// Entity definitions.
pub mod entities;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;
/// Spring animation.
pub mod spring;
/// Feed/detail transition state machine.
pub mod transition;

pub use entities::{Article, ArticleId, ImageSlot};
pub use ports::{ImageCachePort, ImageFetchPort};
pub use transition::{DragFeedback, DragOutcome, Phase, TransitionConfig, TransitionController};
