mod footer_bar;
mod image_state;
mod news_card;

pub use footer_bar::{FooterBar, FooterBarStyle};
pub use image_state::{ImageManager, ImagePane, ImageView};
pub use news_card::{CARD_HEIGHT, NewsCard, RELATED_CARD_HEIGHT, RELATED_CARD_WIDTH, RelatedCard};
