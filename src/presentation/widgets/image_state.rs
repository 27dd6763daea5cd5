//! Image slot state for card and hero rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph, StatefulWidget, Widget};
use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{Resize, StatefulImage};

use crate::domain::entities::{ImageLoadedEvent, ImageSlot, RequesterId};

const PLACEHOLDER_GLYPH: &str = "▣";

/// An [`ImageSlot`] plus the terminal protocol state used to draw it.
pub struct ImageView {
    slot: ImageSlot,
    protocol: Option<StatefulProtocol>,
}

impl ImageView {
    #[must_use]
    pub fn new(url: Option<&str>) -> Self {
        Self {
            slot: ImageSlot::new(url.map(str::to_owned)),
            protocol: None,
        }
    }

    #[must_use]
    pub const fn slot(&self) -> &ImageSlot {
        &self.slot
    }

    pub const fn slot_mut(&mut self) -> &mut ImageSlot {
        &mut self.slot
    }

    #[must_use]
    pub const fn requester(&self) -> RequesterId {
        self.slot.requester()
    }

    /// Applies a completion. Returns true if it was for this view.
    pub fn apply(&mut self, event: &ImageLoadedEvent) -> bool {
        let applied = self.slot.apply(event);
        if applied {
            self.protocol = None;
        }
        applied
    }

    fn ensure_protocol(&mut self, picker: &Picker) {
        if self.protocol.is_some() {
            return;
        }
        if let Some(image) = self.slot.image() {
            self.protocol = Some(picker.new_resize_protocol((**image).clone()));
        }
    }

    #[must_use]
    pub const fn has_protocol(&self) -> bool {
        self.protocol.is_some()
    }
}

impl std::fmt::Debug for ImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView")
            .field("slot", &self.slot)
            .field("has_protocol", &self.protocol.is_some())
            .finish()
    }
}

/// Draws an [`ImageView`]: the decoded image when ready, otherwise a flat
/// placeholder. Failures look exactly like the placeholder.
pub struct ImagePane<'a> {
    picker: &'a Picker,
    placeholder_style: Style,
}

impl<'a> ImagePane<'a> {
    #[must_use]
    pub const fn new(picker: &'a Picker) -> Self {
        Self {
            picker,
            placeholder_style: Style::new(),
        }
    }

    #[must_use]
    pub const fn placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }
}

impl StatefulWidget for ImagePane<'_> {
    type State = ImageView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        if state.slot.status().is_ready() {
            state.ensure_protocol(self.picker);
        }

        if let Some(protocol) = state.protocol.as_mut() {
            StatefulImage::default()
                .resize(Resize::Crop(None))
                .render(area, buf, protocol);
            return;
        }

        Block::default().style(self.placeholder_style).render(area, buf);
        let glyph_area = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        Paragraph::new(PLACEHOLDER_GLYPH)
            .alignment(Alignment::Center)
            .style(self.placeholder_style)
            .render(glyph_area, buf);
    }
}

/// Owns the terminal graphics picker.
pub struct ImageManager {
    picker: Picker,
}

impl ImageManager {
    /// Queries the terminal for graphics support, falling back to halfblocks.
    #[must_use]
    pub fn new() -> Self {
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

        let caps = picker.capabilities();
        let has_sixel = caps
            .iter()
            .any(|c| matches!(c, ratatui_image::picker::Capability::Sixel));
        let has_kitty = caps
            .iter()
            .any(|c| matches!(c, ratatui_image::picker::Capability::Kitty));

        if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
            picker.set_protocol_type(ProtocolType::Sixel);
        }

        Self { picker }
    }

    #[must_use]
    pub fn halfblocks() -> Self {
        Self {
            picker: Picker::halfblocks(),
        }
    }

    #[must_use]
    pub fn protocol_type(&self) -> ProtocolType {
        self.picker.protocol_type()
    }

    #[must_use]
    pub const fn picker(&self) -> &Picker {
        &self.picker
    }
}

impl Default for ImageManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn loaded(view: &ImageView) -> ImageLoadedEvent {
        ImageLoadedEvent {
            requester: view.requester(),
            url: view.slot().url().unwrap_or_default().to_string(),
            result: Ok(Arc::new(image::DynamicImage::new_rgb8(8, 8))),
        }
    }

    #[test]
    fn test_placeholder_renders_without_image() {
        let manager = ImageManager::halfblocks();
        let mut view = ImageView::new(None);
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);

        ImagePane::new(manager.picker()).render(area, &mut buf, &mut view);

        assert!(!view.has_protocol());
        let middle_row: Vec<&str> = (0..area.width).map(|x| buf[(x, 1)].symbol()).collect();
        assert!(middle_row.contains(&PLACEHOLDER_GLYPH));
    }

    #[test]
    fn test_ready_image_gets_protocol() {
        let manager = ImageManager::halfblocks();
        let mut view = ImageView::new(Some("https://x/1.png"));
        view.slot_mut().mark_in_flight();
        let event = loaded(&view);
        assert!(view.apply(&event));

        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        ImagePane::new(manager.picker()).render(area, &mut buf, &mut view);

        assert!(view.has_protocol());
    }

    #[test]
    fn test_foreign_event_is_ignored() {
        let mut view = ImageView::new(Some("https://x/1.png"));
        let other = ImageView::new(Some("https://x/1.png"));
        assert!(!view.apply(&loaded(&other)));
        assert!(view.slot().status().shows_placeholder());
    }
}
