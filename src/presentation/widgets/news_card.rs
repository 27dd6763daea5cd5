//! Article cards for the feed and the related-articles strip.

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget, Wrap};
use ratatui_image::picker::Picker;
use unicode_width::UnicodeWidthStr;

use super::image_state::{ImagePane, ImageView};
use crate::domain::entities::Article;
use crate::presentation::theme::Theme;

/// Rows taken by one feed card, borders included.
pub const CARD_HEIGHT: u16 = 13;
const CARD_IMAGE_ROWS: u16 = 6;

/// Size of one related-article card.
pub const RELATED_CARD_WIDTH: u16 = 26;
pub const RELATED_CARD_HEIGHT: u16 = 9;
const RELATED_IMAGE_ROWS: u16 = 4;

pub struct NewsCard<'a> {
    article: &'a Article,
    picker: &'a Picker,
    theme: &'a Theme,
    now: DateTime<Utc>,
    selected: bool,
}

impl<'a> NewsCard<'a> {
    #[must_use]
    pub const fn new(
        article: &'a Article,
        picker: &'a Picker,
        theme: &'a Theme,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            article,
            picker,
            theme,
            now,
            selected: false,
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl StatefulWidget for NewsCard<'_> {
    type State = ImageView;

    fn render(self, area: Rect, buf: &mut Buffer, image: &mut Self::State) {
        let border_style = if self.selected {
            Style::default().fg(self.theme.accent)
        } else {
            self.theme.dimmed_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [image_area, title_area, subtitle_area, meta_area] = Layout::vertical([
            Constraint::Length(CARD_IMAGE_ROWS),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        ImagePane::new(self.picker)
            .placeholder_style(self.theme.placeholder_style)
            .render(image_area, buf, image);

        let padded = |r: Rect| r.inner(ratatui::layout::Margin::new(1, 0));

        Paragraph::new(self.article.title())
            .style(self.theme.title_style)
            .wrap(Wrap { trim: true })
            .render(padded(title_area), buf);

        Paragraph::new(self.article.subtitle())
            .style(self.theme.dimmed_style)
            .wrap(Wrap { trim: true })
            .render(padded(subtitle_area), buf);

        meta_line(
            self.article.author(),
            &self.article.relative_age(self.now),
            self.theme,
            padded(meta_area),
            buf,
        );
    }
}

/// Compact card used under "Related Articles".
pub struct RelatedCard<'a> {
    article: &'a Article,
    picker: &'a Picker,
    theme: &'a Theme,
}

impl<'a> RelatedCard<'a> {
    #[must_use]
    pub const fn new(article: &'a Article, picker: &'a Picker, theme: &'a Theme) -> Self {
        Self {
            article,
            picker,
            theme,
        }
    }
}

impl StatefulWidget for RelatedCard<'_> {
    type State = ImageView;

    fn render(self, area: Rect, buf: &mut Buffer, image: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.dimmed_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [image_area, title_area, author_area] = Layout::vertical([
            Constraint::Length(RELATED_IMAGE_ROWS),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        ImagePane::new(self.picker)
            .placeholder_style(self.theme.placeholder_style)
            .render(image_area, buf, image);

        Paragraph::new(self.article.title())
            .style(self.theme.title_style)
            .wrap(Wrap { trim: true })
            .render(title_area, buf);

        Paragraph::new(self.article.author())
            .style(self.theme.dimmed_style)
            .render(author_area, buf);
    }
}

fn meta_line(author: &str, age: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let author_width = u16::try_from(author.width()).unwrap_or(u16::MAX);
    let age_width = u16::try_from(age.width()).unwrap_or(u16::MAX);
    let gap = area.width.saturating_sub(author_width + age_width).max(1);

    Line::from(vec![
        Span::styled(author, theme.dimmed_style),
        Span::raw(" ".repeat(usize::from(gap))),
        Span::styled(age, theme.dimmed_style),
    ])
    .render(area, buf);
}
