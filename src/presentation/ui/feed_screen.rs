//! Scrollable list of article cards.

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui_image::picker::Picker;

use crate::application::FeedService;
use crate::domain::entities::{ArticleId, ImageLoadedEvent};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{CARD_HEIGHT, ImageView, NewsCard};

const CARD_GAP: u16 = 1;
const HEADER_ROWS: u16 = 2;

/// One card: its article and its own image request site.
pub struct CardState {
    pub article: ArticleId,
    pub image: ImageView,
}

pub struct FeedScreenState {
    cards: Vec<CardState>,
    selected: usize,
    scroll: usize,
    card_rects: Vec<(usize, Rect)>,
}

impl FeedScreenState {
    #[must_use]
    pub fn new(feed: &FeedService) -> Self {
        let cards = feed
            .articles()
            .iter()
            .map(|article| CardState {
                article: article.id().clone(),
                image: ImageView::new(article.image_url()),
            })
            .collect();

        Self {
            cards,
            selected: 0,
            scroll: 0,
            card_rects: Vec::new(),
        }
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut CardState> {
        self.cards.iter_mut()
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub const fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub const fn select_first(&mut self) {
        self.selected = 0;
    }

    pub const fn select_last(&mut self) {
        self.selected = self.cards.len().saturating_sub(1);
    }

    /// The selected card's article and its last drawn rectangle.
    #[must_use]
    pub fn selected_card(&self) -> Option<(ArticleId, Rect)> {
        let card = self.cards.get(self.selected)?;
        let rect = self
            .card_rects
            .iter()
            .find(|(i, _)| *i == self.selected)
            .map(|(_, r)| *r)
            .unwrap_or_default();
        Some((card.article.clone(), rect))
    }

    /// Card under a screen cell, selecting it.
    pub fn card_at(&mut self, column: u16, row: u16) -> Option<(ArticleId, Rect)> {
        let position = Position::new(column, row);
        let (index, rect) = *self
            .card_rects
            .iter()
            .find(|(_, rect)| rect.contains(position))?;
        self.selected = index;
        Some((self.cards[index].article.clone(), rect))
    }

    /// Routes a completion to the card that requested it.
    pub fn apply(&mut self, event: &ImageLoadedEvent) -> bool {
        self.cards.iter_mut().any(|card| card.image.apply(event))
    }

    fn ensure_visible(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }
}

pub struct FeedScreen<'a> {
    feed: &'a FeedService,
    picker: &'a Picker,
    theme: &'a Theme,
    now: DateTime<Utc>,
}

impl<'a> FeedScreen<'a> {
    #[must_use]
    pub const fn new(
        feed: &'a FeedService,
        picker: &'a Picker,
        theme: &'a Theme,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            feed,
            picker,
            theme,
            now,
        }
    }
}

impl StatefulWidget for FeedScreen<'_> {
    type State = FeedScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(HEADER_ROWS), Constraint::Min(0)]).areas(area);

        Line::styled("News", self.theme.title_style)
            .render(header_area.inner(Margin::new(2, 0)), buf);

        let list_area = list_area.inner(Margin::new(2, 0));
        let stride = CARD_HEIGHT + CARD_GAP;
        state.ensure_visible(usize::from(list_area.height / stride));
        state.card_rects.clear();

        let mut y = list_area.y;
        for index in state.scroll..state.cards.len() {
            if y >= list_area.bottom() {
                break;
            }
            let height = CARD_HEIGHT.min(list_area.bottom() - y);
            let rect = Rect::new(list_area.x, y, list_area.width, height);
            let selected = index == state.selected;
            let card = &mut state.cards[index];

            if let Some(article) = self.feed.find(&card.article) {
                NewsCard::new(article, self.picker, self.theme, self.now)
                    .selected(selected)
                    .render(rect, buf, &mut card.image);
                state.card_rects.push((index, rect));
            }

            y = y.saturating_add(stride);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sample_articles::sample_articles;
    use crate::presentation::widgets::ImageManager;

    fn feed() -> FeedService {
        FeedService::new(sample_articles(Utc::now()))
    }

    fn render(state: &mut FeedScreenState, feed: &FeedService, area: Rect) -> Buffer {
        let manager = ImageManager::halfblocks();
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        FeedScreen::new(feed, manager.picker(), &theme, Utc::now()).render(area, &mut buf, state);
        buf
    }

    #[test]
    fn test_selection_is_clamped() {
        let feed = feed();
        let mut state = FeedScreenState::new(&feed);

        state.select_previous();
        assert_eq!(state.selected_index(), 0);
        state.select_last();
        assert_eq!(state.selected_index(), 3);
        state.select_next();
        assert_eq!(state.selected_index(), 3);
        state.select_first();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_click_hits_drawn_card() {
        let feed = feed();
        let mut state = FeedScreenState::new(&feed);
        render(&mut state, &feed, Rect::new(0, 0, 60, 40));

        let second_row = HEADER_ROWS + CARD_HEIGHT + CARD_GAP + 2;
        let (id, rect) = state.card_at(10, second_row).expect("card under cursor");
        assert_eq!(id.as_str(), "a2");
        assert_eq!(rect.height, CARD_HEIGHT);
        assert_eq!(state.selected_index(), 1);

        assert!(state.card_at(10, 0).is_none());
    }

    #[test]
    fn test_selected_card_scrolls_into_view() {
        let feed = feed();
        let mut state = FeedScreenState::new(&feed);
        state.select_last();
        render(&mut state, &feed, Rect::new(0, 0, 60, 20));

        let (id, rect) = state.selected_card().expect("selected");
        assert_eq!(id.as_str(), "a4");
        assert_eq!(rect.y, HEADER_ROWS);
    }

    #[test]
    fn test_each_card_has_its_own_requester() {
        let feed = feed();
        let mut state = FeedScreenState::new(&feed);
        let requesters: std::collections::HashSet<_> =
            state.cards_mut().map(|c| c.image.requester()).collect();
        assert_eq!(requesters.len(), feed.len());
    }
}
