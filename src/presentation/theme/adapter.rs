use coolor::{Hsl, Rgb};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Color value used for `Color::Reset` foregrounds when fading.
const DEFAULT_FOREGROUND: (u8, u8, u8) = (229, 229, 229);

pub struct ColorConverter;

impl ColorConverter {
    #[must_use]
    pub fn to_rgb(color: Color) -> (u8, u8, u8) {
        match color {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Indexed(i) => indexed_to_rgb(i),
            Color::Reset => DEFAULT_FOREGROUND,
            named => named_to_rgb(named),
        }
    }

    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        let (r, g, b) = Self::to_rgb(color);
        Rgb::new(r, g, b).to_hsl()
    }

    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Fades `color` toward black. `opacity` of 1 leaves it unchanged, 0
    /// yields black.
    #[must_use]
    pub fn fade(color: Color, opacity: f32) -> Color {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity >= 1.0 {
            return color;
        }
        let mut hsl = Self::to_hsl(color);
        hsl.l *= opacity;
        Self::to_ratatui(hsl)
    }

    /// Fades every cell of `area` in place.
    pub fn fade_area(buf: &mut Buffer, area: Rect, opacity: f32) {
        if opacity >= 1.0 {
            return;
        }
        let area = area.intersection(buf.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &mut buf[(x, y)];
                cell.fg = Self::fade(cell.fg, opacity);
                if cell.bg != Color::Reset {
                    cell.bg = Self::fade(cell.bg, opacity);
                }
            }
        }
    }
}

fn named_to_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Black => (0, 0, 0),
        Color::Red => (170, 0, 0),
        Color::Green => (0, 170, 0),
        Color::Yellow => (170, 85, 0),
        Color::Blue => (0, 0, 170),
        Color::Magenta => (170, 0, 170),
        Color::Cyan => (0, 170, 170),
        Color::Gray => (170, 170, 170),
        Color::DarkGray => (85, 85, 85),
        Color::LightRed => (255, 85, 85),
        Color::LightGreen => (85, 255, 85),
        Color::LightYellow => (255, 255, 85),
        Color::LightBlue => (85, 85, 255),
        Color::LightMagenta => (255, 85, 255),
        Color::LightCyan => (85, 255, 255),
        _ => (255, 255, 255),
    }
}

fn indexed_to_rgb(i: u8) -> (u8, u8, u8) {
    const BASE: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];

    match i {
        0..=15 => named_to_rgb(BASE[usize::from(i)]),
        16..=231 => {
            let i = i - 16;
            let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }
    }
}
