//! UI screens.

mod app;
mod detail_screen;
mod feed_screen;

pub use app::App;
pub use detail_screen::{DetailScreen, DetailScreenState};
pub use feed_screen::{CardState, FeedScreen, FeedScreenState};
