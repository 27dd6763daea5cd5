use super::adapter::ColorConverter;
use crate::domain::entities::HighlightTone;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub base_style: Style,
    pub title_style: Style,
    pub placeholder_style: Style,
    pub backdrop: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan")
    }
}

impl Theme {
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let mut selection_bg_hsl = ColorConverter::to_hsl(accent);
        selection_bg_hsl.l = 0.2;
        selection_bg_hsl.s = 0.3;
        let selection_bg = ColorConverter::to_ratatui(selection_bg_hsl);

        Self {
            accent,
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
            title_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            placeholder_style: Style::default().bg(Color::Rgb(60, 60, 60)).fg(Color::Gray),
            backdrop: Color::Black,
        }
    }

    /// Foreground color of a highlight row icon.
    #[must_use]
    pub const fn tone(&self, tone: HighlightTone) -> Color {
        match tone {
            HighlightTone::Green => Color::Green,
            HighlightTone::Blue => Color::Blue,
            HighlightTone::Orange => Color::Indexed(208),
            HighlightTone::Purple => Color::Magenta,
        }
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Cyan,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => {
            let doubled: String = s.chars().flat_map(|c| [c, c]).collect();
            Some((
                channel(&doubled[0..2])?,
                channel(&doubled[2..4])?,
                channel(&doubled[4..6])?,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Red"), Color::Red);
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("Orange"), Color::Indexed(208));
        assert_eq!(parse_color("Invalid"), Color::Cyan);
    }

    #[test]
    fn test_tones_are_distinct() {
        let theme = Theme::default();
        let tones = [
            HighlightTone::Green,
            HighlightTone::Blue,
            HighlightTone::Orange,
            HighlightTone::Purple,
        ]
        .map(|t| theme.tone(t));
        for (i, a) in tones.iter().enumerate() {
            for b in &tones[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
