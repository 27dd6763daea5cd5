use crate::domain::Phase;
use crate::domain::keybinding::Keybind;
use crate::presentation::theme::{ColorConverter, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " · ";

pub struct FooterBarStyle {
    pub background: Style,
    pub badge: Style,
    pub key: Style,
    pub label: Style,
    pub info: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let mut badge_hsl = ColorConverter::to_hsl(theme.accent);
        badge_hsl.l = 0.12;
        badge_hsl.s = 0.4;

        Self {
            badge: Style::default()
                .bg(ColorConverter::to_ratatui(badge_hsl))
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            key: Style::default().fg(theme.accent),
            ..Self::default()
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            badge: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key: Style::default().fg(Color::Cyan),
            label: Style::default().fg(Color::Gray),
            info: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Bottom row: the transition phase, the key hints of the active screen and
/// a free-form note on the right.
pub struct FooterBar<'a> {
    phase: Phase,
    hints: &'a [Keybind],
    info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(phase: Phase, hints: &'a [Keybind]) -> Self {
        Self {
            phase,
            hints,
            info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn info(mut self, info: Option<&'a str>) -> Self {
        self.info = info;
        self
    }

    #[must_use]
    pub fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    const fn badge(phase: Phase) -> &'static str {
        match phase {
            Phase::Feed => " FEED ",
            Phase::Open => " ARTICLE ",
            Phase::Dragging => " DISMISS ",
        }
    }

    fn format_key(key: &KeyEvent) -> String {
        let prefix = if key.modifiers.contains(KeyModifiers::CONTROL) {
            "C-"
        } else if key.modifiers.contains(KeyModifiers::ALT) {
            "A-"
        } else {
            ""
        };

        let name = match key.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        format!("{prefix}{name}")
    }

    fn hint_spans(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::with_capacity(self.hints.len() * 4);
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, self.style.info));
            }
            spans.push(Span::styled(Self::format_key(&hint.key), self.style.key));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(hint.label.clone(), self.style.label));
        }
        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.style.background);

        let badge = Self::badge(self.phase);
        let info = self.info.unwrap_or_default();
        let [badge_area, hints_area, info_area] = Layout::horizontal([
            Constraint::Length(u16::try_from(badge.width()).unwrap_or(u16::MAX)),
            Constraint::Min(0),
            Constraint::Length(u16::try_from(info.width()).unwrap_or(u16::MAX)),
        ])
        .spacing(1)
        .areas(area);

        Span::styled(badge, self.style.badge).render(badge_area, buf);
        Line::from(self.hint_spans()).render(hints_area, buf);
        Span::styled(info, self.style.info).render(info_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::Action;
    use test_case::test_case;

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test_case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), "C-c" ; "ctrl")]
    #[test_case(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), "Space" ; "space")]
    #[test_case(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT), "G" ; "shifted char")]
    #[test_case(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), "↓" ; "arrow")]
    fn test_format_key(key: KeyEvent, expected: &str) {
        assert_eq!(FooterBar::format_key(&key), expected);
    }

    #[test]
    fn test_renders_badge_hints_and_info() {
        let hints = [
            Keybind::new(
                KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
                Action::Open,
                "Open",
            ),
            Keybind::new(
                KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
                Action::Quit,
                "Quit",
            ),
        ];
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(Phase::Feed, &hints)
            .info(Some("4 stories"))
            .render(area, &mut buf);

        let text = text(&buf);
        assert!(text.starts_with(" FEED "));
        assert!(text.contains("Enter Open · q Quit"));
        assert!(text.ends_with("4 stories"));
    }

    #[test_case(Phase::Open, "ARTICLE" ; "open")]
    #[test_case(Phase::Dragging, "DISMISS" ; "dragging")]
    fn test_badge_follows_phase(phase: Phase, badge: &str) {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        FooterBar::new(phase, &[]).render(area, &mut buf);
        assert!(text(&buf).contains(badge));
    }
}
