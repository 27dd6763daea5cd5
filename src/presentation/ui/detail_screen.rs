//! Full-screen article view with drag-to-dismiss feedback.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, StatefulWidget, Widget};
use ratatui_image::picker::Picker;
use tachyonfx::{Effect, Interpolation, fx};
use unicode_width::UnicodeWidthStr;

use crate::application::FeedService;
use crate::domain::entities::{Article, ArticleId, ImageLoadedEvent};
use crate::domain::DragFeedback;
use crate::presentation::theme::{ColorConverter, Theme};
use crate::presentation::ui::CardState;
use crate::presentation::widgets::{
    ImagePane, ImageView, RELATED_CARD_HEIGHT, RELATED_CARD_WIDTH, RelatedCard,
};

const CONTENT_PADDING: u16 = 2;
const MIN_HERO_ROWS: u16 = 6;
const MAX_HERO_ROWS: u16 = 16;
const BOTTOM_PADDING: u16 = 3;
const CLOSE_GLYPH: &str = " ✕ ";

pub struct DetailScreenState {
    article: ArticleId,
    hero: ImageView,
    related: Vec<CardState>,
    scroll: u16,
    max_scroll: u16,
    close_button: Rect,
    entrance: Option<Effect>,
    pending: Duration,
}

impl DetailScreenState {
    /// Builds the view for `article`. `entrance` plays a coalesce effect over
    /// the text for the given duration.
    #[must_use]
    pub fn new(article: &Article, feed: &FeedService, entrance: Option<Duration>) -> Self {
        let related = feed
            .related(article.id())
            .into_iter()
            .map(|a| CardState {
                article: a.id().clone(),
                image: ImageView::new(a.image_url()),
            })
            .collect();

        let entrance = entrance.map(|d| {
            let millis = u32::try_from(d.as_millis()).unwrap_or(u32::MAX);
            fx::coalesce((millis, Interpolation::CircOut))
        });

        Self {
            article: article.id().clone(),
            hero: ImageView::new(article.image_url()),
            related,
            scroll: 0,
            max_scroll: 0,
            close_button: Rect::default(),
            entrance,
            pending: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn article(&self) -> &ArticleId {
        &self.article
    }

    /// Every image request site of this view: hero first, then related cards.
    pub fn images_mut(&mut self) -> impl Iterator<Item = &mut ImageView> {
        std::iter::once(&mut self.hero).chain(self.related.iter_mut().map(|c| &mut c.image))
    }

    /// Routes a completion to the view that requested it.
    pub fn apply(&mut self, event: &ImageLoadedEvent) -> bool {
        self.images_mut().any(|view| view.apply(event))
    }

    #[must_use]
    pub const fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
    }

    pub const fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// True if the cell is on the close button as last drawn.
    #[must_use]
    pub fn hits_close(&self, column: u16, row: u16) -> bool {
        self.close_button.contains(Position::new(column, row))
    }

    pub fn tick(&mut self, dt: Duration) {
        self.pending = self.pending.saturating_add(dt);
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.entrance.is_some()
    }
}

pub struct DetailScreen<'a> {
    feed: &'a FeedService,
    picker: &'a Picker,
    theme: &'a Theme,
    feedback: DragFeedback,
    offset_rows: u16,
}

impl<'a> DetailScreen<'a> {
    #[must_use]
    pub const fn new(feed: &'a FeedService, picker: &'a Picker, theme: &'a Theme) -> Self {
        Self {
            feed,
            picker,
            theme,
            feedback: DragFeedback::REST,
            offset_rows: 0,
        }
    }

    /// Fade and scale to apply for the current drag offset.
    #[must_use]
    pub const fn feedback(mut self, feedback: DragFeedback, offset_rows: u16) -> Self {
        self.feedback = feedback;
        self.offset_rows = offset_rows;
        self
    }
}

impl StatefulWidget for DetailScreen<'_> {
    type State = DetailScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(article) = self.feed.find(&state.article) else {
            return;
        };

        let shift = self.offset_rows.min(area.height);
        let view = Rect::new(area.x, area.y + shift, area.width, area.height - shift);
        if view.is_empty() {
            state.close_button = Rect::default();
            return;
        }

        Clear.render(view, buf);
        Block::default().style(self.theme.base_style).render(view, buf);

        let hero_rows = (area.height * 2 / 5).clamp(MIN_HERO_ROWS, MAX_HERO_ROWS);
        let column = scale_width(view, self.feedback.content_scale);
        let text_width = column.width.saturating_sub(CONTENT_PADDING * 2);
        let lines = article_lines(article, self.feed, self.theme, text_width);
        let text_rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let related_rows = if state.related.is_empty() {
            0
        } else {
            RELATED_CARD_HEIGHT + 1
        };

        let page_rows = hero_rows
            .saturating_add(text_rows)
            .saturating_add(related_rows)
            .saturating_add(BOTTOM_PADDING);
        state.max_scroll = page_rows.saturating_sub(view.height);
        state.scroll = state.scroll.min(state.max_scroll);

        let window = PageWindow {
            scroll: state.scroll,
            view,
        };

        if let Some(hero_area) = window.visible(0, hero_rows, view) {
            ImagePane::new(self.picker)
                .placeholder_style(self.theme.placeholder_style)
                .render(hero_area, buf, &mut state.hero);
        }

        let text_column = Rect::new(
            column.x + CONTENT_PADDING.min(column.width),
            column.y,
            text_width,
            column.height,
        );
        let mut content_rows = Rect::default();
        if let Some(text_area) = window.visible(hero_rows, text_rows, text_column) {
            let skipped = state.scroll.saturating_sub(hero_rows);
            Paragraph::new(lines)
                .scroll((skipped, 0))
                .render(text_area, buf);
            content_rows = text_area;
        }

        let related_top = hero_rows.saturating_add(text_rows);
        if let Some(strip) = window.visible(related_top, related_rows, text_column) {
            let mut x = strip.x;
            for card in &mut state.related {
                if x >= strip.right() || strip.height < 3 {
                    break;
                }
                let Some(related) = self.feed.find(&card.article) else {
                    continue;
                };
                let width = RELATED_CARD_WIDTH.min(strip.right() - x);
                let height = strip.height.min(RELATED_CARD_HEIGHT);
                RelatedCard::new(related, self.picker, self.theme).render(
                    Rect::new(x, strip.y, width, height),
                    buf,
                    &mut card.image,
                );
                x = x.saturating_add(RELATED_CARD_WIDTH + 2);
            }
            content_rows = if content_rows.is_empty() {
                strip
            } else {
                content_rows.union(strip)
            };
        }

        if !content_rows.is_empty() {
            let duration = std::mem::take(&mut state.pending);
            if let Some(effect) = state.entrance.as_mut() {
                let overflow = effect.process(duration.into(), buf, content_rows);
                if overflow.is_some() {
                    state.entrance = None;
                }
            }
            ColorConverter::fade_area(buf, content_rows, self.feedback.content_opacity);
        }

        state.close_button = render_toolbar(view, buf, self.theme, self.feedback.toolbar_opacity);
    }
}

/// Maps page rows onto the screen for the current scroll position.
struct PageWindow {
    scroll: u16,
    view: Rect,
}

impl PageWindow {
    /// Screen rectangle (with `column`'s x and width) showing the page rows
    /// `[top, top + rows)`, or `None` if they are scrolled out of view.
    fn visible(&self, top: u16, rows: u16, column: Rect) -> Option<Rect> {
        let bottom = top.saturating_add(rows);
        let window_bottom = self.scroll.saturating_add(self.view.height);
        let start = top.max(self.scroll);
        let end = bottom.min(window_bottom);
        if start >= end || column.width == 0 {
            return None;
        }
        Some(Rect::new(
            column.x,
            self.view.y + (start - self.scroll),
            column.width,
            end - start,
        ))
    }
}

fn render_toolbar(view: Rect, buf: &mut Buffer, theme: &Theme, opacity: f32) -> Rect {
    let width = u16::try_from(CLOSE_GLYPH.width()).unwrap_or(3);
    let button = Rect::new(
        view.x + CONTENT_PADDING.min(view.width),
        view.y + 1.min(view.height.saturating_sub(1)),
        width,
        1,
    )
    .intersection(view);

    Span::styled(
        CLOSE_GLYPH,
        Style::default()
            .fg(ratatui::style::Color::White)
            .bg(theme.backdrop)
            .add_modifier(Modifier::BOLD),
    )
    .render(button, buf);
    ColorConverter::fade_area(buf, button, opacity);
    button
}

/// Shrinks `area` horizontally around its center.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale_width(area: Rect, scale: f32) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = (f32::from(area.width) * scale).round() as u16;
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

fn article_lines<'a>(
    article: &'a Article,
    feed: &'a FeedService,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'a>> {
    let width = usize::from(width.max(1));
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    lines.push(Line::default());
    lines.extend(wrap(article.title(), width, theme.title_style));
    lines.extend(wrap(article.subtitle(), width, theme.dimmed_style));
    lines.push(Line::default());
    lines.push(byline(article, width, theme.dimmed_style));
    lines.push(Line::styled("─".repeat(width), theme.dimmed_style));
    lines.push(Line::default());
    lines.extend(wrap(article.body(), width, theme.base_style));

    lines.push(Line::default());
    lines.push(Line::styled("Key Highlights", heading));
    lines.push(Line::default());
    for highlight in feed.highlights() {
        lines.push(Line::from(vec![
            Span::styled(highlight.icon, Style::default().fg(theme.tone(highlight.tone))),
            Span::raw("  "),
            Span::styled(highlight.text, theme.base_style),
        ]));
    }

    for section in feed.sections() {
        lines.push(Line::default());
        lines.push(Line::styled("─".repeat(width), theme.dimmed_style));
        lines.push(Line::default());
        lines.push(Line::styled(section.title, heading));
        lines.push(Line::default());
        lines.extend(wrap(section.body, width, theme.base_style));
    }

    if !feed.related(article.id()).is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled("Related Articles", heading));
        lines.push(Line::default());
    }

    lines
}

fn byline<'a>(article: &Article, width: usize, style: Style) -> Line<'a> {
    let author = format!("By {}", article.author());
    let date = article.published_at().format("%b %-d, %Y").to_string();
    let gap = width.saturating_sub(author.width() + date.width()).max(1);
    Line::from(vec![
        Span::styled(author, style),
        Span::raw(" ".repeat(gap)),
        Span::styled(date, style),
    ])
}

/// Greedy word wrap. Blank lines in `text` are kept as paragraph breaks.
fn wrap<'a>(text: &str, width: usize, style: Style) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.width()
            } else {
                current.width() + 1 + word.width()
            };
            if needed > width && !current.is_empty() {
                lines.push(Line::styled(std::mem::take(&mut current), style));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(Line::styled(current, style));
    }
    lines
}
