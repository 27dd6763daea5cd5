//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Terminal event helpers.
pub struct EventHandler;

impl EventHandler {
    /// Ctrl+C, which quits from every screen.
    #[must_use]
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Returns the cell of a left click, if `mouse` is one.
    #[must_use]
    pub fn left_click(mouse: &MouseEvent) -> Option<(u16, u16)> {
        matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            .then_some((mouse.column, mouse.row))
    }
}

/// Phase of a mouse drag as seen by the detail view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The drag moved; vertical translation in points since the press.
    Changed(f32),
    /// The button was released at this translation.
    Ended(f32),
}

/// Turns left-button mouse events into a vertical drag translation.
///
/// Terminal rows are mapped to points with a fixed factor so the same
/// thresholds apply regardless of terminal size.
#[derive(Debug, Clone, Copy)]
pub struct DragTracker {
    points_per_row: f32,
    origin_row: Option<u16>,
    moved: bool,
}

impl DragTracker {
    /// Creates a tracker with the given row-to-points factor.
    #[must_use]
    pub const fn new(points_per_row: f32) -> Self {
        Self {
            points_per_row,
            origin_row: None,
            moved: false,
        }
    }

    /// Returns true between a press and its release.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.origin_row.is_some()
    }

    /// Starts tracking at `row`.
    pub const fn press(&mut self, row: u16) {
        self.origin_row = Some(row);
        self.moved = false;
    }

    /// Forgets any press in progress.
    pub const fn cancel(&mut self) {
        self.origin_row = None;
        self.moved = false;
    }

    /// Feeds a mouse event. Only drags and releases of the left button after
    /// a [`press`](Self::press) produce a [`DragEvent`]. A release without any
    /// movement in between produces nothing.
    pub fn handle(&mut self, mouse: &MouseEvent) -> Option<DragEvent> {
        let origin = self.origin_row?;

        match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) => {
                self.moved = true;
                Some(DragEvent::Changed(self.translation(origin, mouse.row)))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let moved = self.moved;
                self.cancel();
                moved.then(|| DragEvent::Ended(self.translation(origin, mouse.row)))
            }
            _ => None,
        }
    }

    /// Converts a point offset into whole terminal rows, rounding down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rows_for(&self, offset: f32) -> u16 {
        if self.points_per_row <= 0.0 || offset <= 0.0 {
            return 0;
        }
        (offset / self.points_per_row).floor().min(f32::from(u16::MAX)) as u16
    }

    fn translation(&self, origin: u16, row: u16) -> f32 {
        (f32::from(row) - f32::from(origin)) * self.points_per_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_force_quit() {
        assert!(EventHandler::is_force_quit(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!EventHandler::is_force_quit(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_force_quit(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_left_click() {
        assert_eq!(
            EventHandler::left_click(&mouse(MouseEventKind::Down(MouseButton::Left), 4)),
            Some((10, 4))
        );
        assert_eq!(
            EventHandler::left_click(&mouse(MouseEventKind::Down(MouseButton::Right), 4)),
            None
        );
    }

    #[test]
    fn test_drag_translates_rows_to_points() {
        let mut tracker = DragTracker::new(20.0);
        tracker.press(5);

        assert_eq!(
            tracker.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 7)),
            Some(DragEvent::Changed(40.0))
        );
        assert_eq!(
            tracker.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 3)),
            Some(DragEvent::Changed(-40.0))
        );
        assert_eq!(
            tracker.handle(&mouse(MouseEventKind::Up(MouseButton::Left), 13)),
            Some(DragEvent::Ended(160.0))
        );
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_release_without_movement_is_not_a_drag() {
        let mut tracker = DragTracker::new(20.0);
        tracker.press(5);
        assert_eq!(
            tracker.handle(&mouse(MouseEventKind::Up(MouseButton::Left), 5)),
            None
        );
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut tracker = DragTracker::new(20.0);
        assert_eq!(
            tracker.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 9)),
            None
        );
    }

    #[test_case(0.0, 0 ; "rest")]
    #[test_case(19.9, 0 ; "under one row")]
    #[test_case(40.0, 2 ; "two rows")]
    #[test_case(-30.0, 0 ; "negative")]
    fn test_rows_for(offset: f32, rows: u16) {
        assert_eq!(DragTracker::new(20.0).rows_for(offset), rows);
    }
}
