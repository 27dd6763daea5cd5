//! Feed/detail transition and drag-to-dismiss state machine.
//!
//! One controller owns the single selection slot. The discrete mode and the
//! continuous drag offset live in the same enum so that an offset can only
//! exist while a drag is actually in progress.

use std::time::Duration;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};
use tachyonfx::Interpolation;
use tracing::{debug, info, trace};

use super::entities::ArticleId;
use super::spring::{Spring, SpringAnimation};

/// Tunable distances and timings for the transition.
///
/// The fade and scale distances are independent linear ramps; none of them is
/// derived from another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Released translation strictly above this dismisses the detail view.
    pub dismiss_threshold: f32,
    /// Offset at which the backdrop becomes fully transparent.
    pub background_fade_distance: f32,
    /// Offset at which the detail content becomes fully transparent.
    pub content_fade_distance: f32,
    /// Offset at which the detail content would shrink to nothing.
    pub content_scale_distance: f32,
    /// Offset at which the toolbar becomes fully transparent.
    pub toolbar_fade_distance: f32,
    /// Length of the zoom entrance, in milliseconds.
    pub zoom_duration_ms: u64,
    /// Spring used to return the offset to rest.
    pub spring_back: Spring,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            dismiss_threshold: 100.0,
            background_fade_distance: 500.0,
            content_fade_distance: 300.0,
            content_scale_distance: 2000.0,
            toolbar_fade_distance: 200.0,
            zoom_duration_ms: 350,
            spring_back: Spring::default(),
        }
    }
}

impl TransitionConfig {
    /// Zoom entrance duration.
    #[must_use]
    pub const fn zoom_duration(&self) -> Duration {
        Duration::from_millis(self.zoom_duration_ms)
    }
}

/// Discrete view of the controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No selection; the feed is interactive.
    Feed,
    /// Detail view presented and at rest (or springing back to rest).
    Open,
    /// Interactive partial dismissal.
    Dragging,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feed => write!(f, "feed"),
            Self::Open => write!(f, "open"),
            Self::Dragging => write!(f, "dragging"),
        }
    }
}

/// Entrance animation from the source card to the full screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomAnimation {
    source: Rect,
    elapsed: Duration,
    duration: Duration,
}

impl ZoomAnimation {
    /// Starts a zoom out of `source`.
    #[must_use]
    pub const fn new(source: Rect, duration: Duration) -> Self {
        Self {
            source,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let linear = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        Interpolation::CircOut.alpha(linear).clamp(0.0, 1.0)
    }

    /// Returns true once the detail view fills the screen.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the animation.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Jumps to the end state.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// Current rectangle, interpolated from the source card to `target`.
    #[must_use]
    pub fn current_rect(&self, target: Rect) -> Rect {
        lerp_rect(self.source, target, self.progress())
    }
}

/// State while the detail view is presented and not being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenState {
    article: ArticleId,
    zoom: ZoomAnimation,
    settle: Option<SpringAnimation>,
}

impl OpenState {
    /// Selected article.
    #[must_use]
    pub const fn article(&self) -> &ArticleId {
        &self.article
    }

    /// Visual offset while springing back, zero at rest.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.settle.as_ref().map_or(0.0, SpringAnimation::value)
    }
}

/// A live drag gesture on the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    article: ArticleId,
    zoom: ZoomAnimation,
    offset: f32,
}

impl DragSession {
    /// Selected article.
    #[must_use]
    pub const fn article(&self) -> &ArticleId {
        &self.article
    }

    /// Downward offset, never negative.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }
}

/// Controller mode with its payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    /// No selection.
    #[default]
    Feed,
    /// Detail view presented.
    Open(OpenState),
    /// Detail view being dragged.
    Dragging(DragSession),
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released past the threshold; the selection was cleared.
    Dismissed,
    /// Released at or below the threshold; springing back to rest.
    SprungBack,
    /// No drag was in progress.
    Ignored,
}

/// Visual feedback derived from the current offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    /// Current downward offset.
    pub offset: f32,
    /// Backdrop opacity.
    pub background_opacity: f32,
    /// Detail content opacity.
    pub content_opacity: f32,
    /// Detail content scale.
    pub content_scale: f32,
    /// Toolbar opacity.
    pub toolbar_opacity: f32,
}

impl DragFeedback {
    /// Feedback at rest.
    pub const REST: Self = Self {
        offset: 0.0,
        background_opacity: 1.0,
        content_opacity: 1.0,
        content_scale: 1.0,
        toolbar_opacity: 1.0,
    };

    /// Computes each ramp independently for `offset`.
    #[must_use]
    pub fn for_offset(offset: f32, config: &TransitionConfig) -> Self {
        Self {
            offset,
            background_opacity: ramp(offset, config.background_fade_distance),
            content_opacity: ramp(offset, config.content_fade_distance),
            content_scale: ramp(offset, config.content_scale_distance),
            toolbar_opacity: ramp(offset, config.toolbar_fade_distance),
        }
    }
}

fn ramp(offset: f32, distance: f32) -> f32 {
    if distance <= 0.0 {
        return if offset > 0.0 { 0.0 } else { 1.0 };
    }
    (1.0 - offset / distance).clamp(0.0, 1.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_u16(from: u16, to: u16, t: f32) -> u16 {
    let value = f32::from(from) + (f32::from(to) - f32::from(from)) * t;
    value.round().clamp(0.0, f32::from(u16::MAX)) as u16
}

fn lerp_rect(from: Rect, to: Rect, t: f32) -> Rect {
    Rect::new(
        lerp_u16(from.x, to.x, t),
        lerp_u16(from.y, to.y, t),
        lerp_u16(from.width, to.width, t),
        lerp_u16(from.height, to.height, t),
    )
}

/// Drives the feed → detail → dismiss lifecycle.
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    mode: Mode,
    config: TransitionConfig,
}

impl TransitionController {
    /// Creates a controller in the `Feed` state.
    #[must_use]
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            mode: Mode::Feed,
            config,
        }
    }

    /// Current mode with payload.
    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.mode {
            Mode::Feed => Phase::Feed,
            Mode::Open(_) => Phase::Open,
            Mode::Dragging(_) => Phase::Dragging,
        }
    }

    /// Returns true while a drag gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.mode, Mode::Dragging(_))
    }

    /// Selected article, if the detail view is presented.
    #[must_use]
    pub const fn selected(&self) -> Option<&ArticleId> {
        match &self.mode {
            Mode::Feed => None,
            Mode::Open(open) => Some(&open.article),
            Mode::Dragging(drag) => Some(&drag.article),
        }
    }

    /// Current visual offset: the drag offset, the spring value, or zero.
    #[must_use]
    pub fn offset(&self) -> f32 {
        match &self.mode {
            Mode::Feed => 0.0,
            Mode::Open(open) => open.offset(),
            Mode::Dragging(drag) => drag.offset,
        }
    }

    /// Opens the detail view for `article`, zooming out of `source`.
    ///
    /// Only possible from `Feed`; returns false otherwise.
    pub fn select(&mut self, article: ArticleId, source: Rect) -> bool {
        if !matches!(self.mode, Mode::Feed) {
            debug!(article = %article, phase = %self.phase(), "Ignoring selection while detail is presented");
            return false;
        }

        info!(article = %article, "Opening article");
        self.mode = Mode::Open(OpenState {
            article,
            zoom: ZoomAnimation::new(source, self.config.zoom_duration()),
            settle: None,
        });
        true
    }

    /// Updates the drag with the gesture's vertical translation.
    ///
    /// Upward translation is clamped to zero.
    pub fn drag_changed(&mut self, translation: f32) {
        let offset = translation.max(0.0);
        let started = match &mut self.mode {
            Mode::Feed => None,
            Mode::Dragging(drag) => {
                drag.offset = offset;
                trace!(offset, "Drag updated");
                None
            }
            Mode::Open(open) => {
                let mut zoom = open.zoom.clone();
                zoom.finish();
                debug!(article = %open.article, offset, "Drag started");
                Some(DragSession {
                    article: open.article.clone(),
                    zoom,
                    offset,
                })
            }
        };

        if let Some(session) = started {
            self.mode = Mode::Dragging(session);
        }
    }

    /// Ends the drag with the released vertical translation.
    pub fn drag_ended(&mut self, translation: f32) -> DragOutcome {
        let Mode::Dragging(drag) = &self.mode else {
            return DragOutcome::Ignored;
        };

        if translation > self.config.dismiss_threshold {
            info!(article = %drag.article, translation, "Drag dismissed article");
            self.mode = Mode::Feed;
            return DragOutcome::Dismissed;
        }

        debug!(article = %drag.article, translation, "Drag below threshold, springing back");
        let settle = SpringAnimation::new(self.config.spring_back, drag.offset, 0.0);
        self.mode = Mode::Open(OpenState {
            article: drag.article.clone(),
            zoom: drag.zoom.clone(),
            settle: (!settle.is_settled()).then_some(settle),
        });
        DragOutcome::SprungBack
    }

    /// Explicit close action. Returns true if a detail view was dismissed.
    pub fn close(&mut self) -> bool {
        if let Some(article) = self.selected() {
            info!(article = %article, "Closing article");
            self.mode = Mode::Feed;
            true
        } else {
            false
        }
    }

    /// Advances the zoom entrance and the spring-back animation.
    pub fn tick(&mut self, dt: Duration) {
        if let Mode::Open(open) = &mut self.mode {
            open.zoom.tick(dt);
            if let Some(settle) = &mut open.settle {
                settle.step(dt);
                if settle.is_settled() {
                    open.settle = None;
                }
            }
        }
    }

    /// Returns true while any animation needs frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        match &self.mode {
            Mode::Open(open) => !open.zoom.is_finished() || open.settle.is_some(),
            Mode::Feed | Mode::Dragging(_) => false,
        }
    }

    /// Fade and scale feedback for the current offset.
    #[must_use]
    pub fn feedback(&self) -> DragFeedback {
        match self.mode {
            Mode::Feed => DragFeedback::REST,
            _ => DragFeedback::for_offset(self.offset(), &self.config),
        }
    }

    /// Eased zoom entrance progress; zero in `Feed`.
    #[must_use]
    pub fn zoom_progress(&self) -> f32 {
        match &self.mode {
            Mode::Feed => 0.0,
            Mode::Open(open) => open.zoom.progress(),
            Mode::Dragging(drag) => drag.zoom.progress(),
        }
    }

    /// Rectangle the detail view occupies inside `full`.
    #[must_use]
    pub fn zoom_rect(&self, full: Rect) -> Rect {
        match &self.mode {
            Mode::Feed => Rect::default(),
            Mode::Open(open) => open.zoom.current_rect(full),
            Mode::Dragging(drag) => drag.zoom.current_rect(full),
        }
    }
}
