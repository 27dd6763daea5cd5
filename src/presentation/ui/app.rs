//! Main application orchestrator.

use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, MouseEvent,
    MouseEventKind,
};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Stylize;
use ratatui::widgets::{Block, Clear};
use ratatui::{DefaultTerminal, Frame};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, trace};

use crate::application::FeedService;
use crate::domain::entities::{ArticleId, ImageLoadedEvent, ImageSlot};
use crate::domain::keybinding::Action;
use crate::domain::{Phase, TransitionController};
use crate::infrastructure::{AppConfig, ImageLoader, UiQueue};
use crate::presentation::commands::{CommandRegistry, Scope};
use crate::presentation::events::{DragEvent, DragTracker, EventHandler, EventResult};
use crate::presentation::theme::{ColorConverter, Theme};
use crate::presentation::ui::{DetailScreen, DetailScreenState, FeedScreen, FeedScreenState};
use crate::presentation::widgets::{FooterBar, FooterBarStyle, ImageManager};

const WHEEL_ROWS: u16 = 3;
const FEED_HINTS: &[Action] = &[
    Action::Open,
    Action::NavigateDown,
    Action::NavigateUp,
    Action::Quit,
];
const DETAIL_HINTS: &[Action] = &[
    Action::Close,
    Action::ScrollDown,
    Action::ScrollUp,
    Action::ScrollToTop,
];

pub struct App {
    running: bool,
    feed: FeedService,
    loader: ImageLoader,
    ui_queue: UiQueue<ImageLoadedEvent>,
    transition: TransitionController,
    commands: CommandRegistry,
    images: ImageManager,
    theme: Theme,
    feed_state: FeedScreenState,
    detail: Option<DetailScreenState>,
    drag: DragTracker,
    mouse: bool,
    enable_animations: bool,
    frame_interval: Duration,
}

impl App {
    #[must_use]
    pub fn new(
        config: &AppConfig,
        feed: FeedService,
        loader: ImageLoader,
        ui_queue: UiQueue<ImageLoadedEvent>,
        images: ImageManager,
    ) -> Self {
        let mut transition = config.transition;
        if !config.ui.enable_animations {
            transition.zoom_duration_ms = 0;
        }

        Self {
            running: true,
            feed_state: FeedScreenState::new(&feed),
            feed,
            loader,
            ui_queue,
            transition: TransitionController::new(transition),
            commands: CommandRegistry::with_overrides(&config.keybindings),
            images,
            theme: Theme::new(&config.ui.accent_color),
            detail: None,
            drag: DragTracker::new(config.ui.points_per_row),
            mouse: config.mouse,
            enable_animations: config.ui.enable_animations,
            frame_interval: config.ui.frame_interval(),
        }
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be drawn to.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if self.mouse {
            crossterm::execute!(terminal.backend_mut(), EnableMouseCapture)?;
        }

        info!(
            articles = self.feed.len(),
            protocol = ?self.images.protocol_type(),
            "Feed ready"
        );
        self.request_feed_images();

        let result = self.run_event_loop(terminal).await;

        if self.mouse {
            crossterm::execute!(terminal.backend_mut(), DisableMouseCapture)?;
        }
        info!("Application exiting normally");
        result
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut frames = interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(event) = self.ui_queue.next() => {
                    self.handle_image_loaded(&event);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = frames.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame);
                    last_frame = now;
                    if self.is_animating() {
                        self.tick(dt);
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.running = false;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn is_animating(&self) -> bool {
        self.transition.is_animating()
            || self
                .detail
                .as_ref()
                .is_some_and(DetailScreenState::is_animating)
    }

    fn tick(&mut self, dt: Duration) {
        self.transition.tick(dt);
        if let Some(detail) = &mut self.detail {
            detail.tick(dt);
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if self.mouse => self.handle_mouse(&mouse),
            _ => EventResult::Continue,
        }
    }

    fn scope(&self) -> Scope {
        if self.detail.is_some() {
            Scope::Detail
        } else {
            Scope::Feed
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_force_quit(&key) {
            return EventResult::Exit;
        }

        match self.commands.find_action(self.scope(), key) {
            Some(action) => self.handle_action(action),
            None => EventResult::Continue,
        }
    }

    fn handle_action(&mut self, action: Action) -> EventResult {
        let dragging = self.transition.is_dragging();
        match action {
            Action::Quit => return EventResult::Exit,
            Action::NavigateDown => self.feed_state.select_next(),
            Action::NavigateUp => self.feed_state.select_previous(),
            Action::SelectFirst => self.feed_state.select_first(),
            Action::SelectLast => self.feed_state.select_last(),
            Action::Open => {
                if let Some((article, source)) = self.feed_state.selected_card() {
                    self.open(article, source);
                }
            }
            Action::Close => self.close(),
            Action::ScrollDown | Action::ScrollUp | Action::ScrollToTop if dragging => {}
            Action::ScrollDown => {
                if let Some(detail) = &mut self.detail {
                    detail.scroll_down(1);
                }
            }
            Action::ScrollUp => {
                if let Some(detail) = &mut self.detail {
                    detail.scroll_up(1);
                }
            }
            Action::ScrollToTop => {
                if let Some(detail) = &mut self.detail {
                    detail.scroll_to_top();
                }
            }
        }
        EventResult::Consumed
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> EventResult {
        if let Some((column, row)) = EventHandler::left_click(mouse) {
            let on_close = self
                .detail
                .as_ref()
                .map(|detail| detail.hits_close(column, row));
            match on_close {
                None => {
                    if let Some((article, source)) = self.feed_state.card_at(column, row) {
                        self.open(article, source);
                    }
                }
                Some(true) => self.close(),
                Some(false) => self.drag.press(row),
            }
            return EventResult::Consumed;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_wheel(true),
            MouseEventKind::ScrollUp => self.scroll_wheel(false),
            _ => {}
        }

        match self.drag.handle(mouse) {
            Some(DragEvent::Changed(translation)) => {
                self.transition.drag_changed(translation);
                EventResult::Consumed
            }
            Some(DragEvent::Ended(translation)) => {
                let outcome = self.transition.drag_ended(translation);
                debug!(?outcome, translation, "Drag released");
                self.sync_detail();
                EventResult::Consumed
            }
            None => EventResult::Continue,
        }
    }

    fn scroll_wheel(&mut self, down: bool) {
        match &mut self.detail {
            Some(_) if self.transition.is_dragging() => {}
            Some(detail) if down => detail.scroll_down(WHEEL_ROWS),
            Some(detail) => detail.scroll_up(WHEEL_ROWS),
            None if down => self.feed_state.select_next(),
            None => self.feed_state.select_previous(),
        }
    }

    fn open(&mut self, article: ArticleId, source: Rect) {
        let Some(found) = self.feed.find(&article) else {
            return;
        };
        if !self.transition.select(article, source) {
            return;
        }

        let entrance = self
            .enable_animations
            .then(|| self.transition.config().zoom_duration());
        let mut detail = DetailScreenState::new(found, &self.feed, entrance);
        for view in detail.images_mut() {
            request_image(&self.loader, view.slot_mut());
        }
        self.detail = Some(detail);
    }

    fn close(&mut self) {
        if self.transition.close() {
            self.drag.cancel();
        }
        self.sync_detail();
    }

    /// Drops the detail view once the controller is back in `Feed`.
    fn sync_detail(&mut self) {
        if self.transition.phase() == Phase::Feed && self.detail.take().is_some() {
            self.drag.cancel();
        }
    }

    fn request_feed_images(&mut self) {
        for card in self.feed_state.cards_mut() {
            request_image(&self.loader, card.image.slot_mut());
        }
    }

    fn handle_image_loaded(&mut self, event: &ImageLoadedEvent) {
        let applied = self.feed_state.apply(event)
            || self.detail.as_mut().is_some_and(|detail| detail.apply(event));
        if !applied {
            debug!(
                url = %event.url,
                requester = %event.requester,
                "Dropping image completion with no live view"
            );
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        let picker = self.images.picker();

        frame.render_stateful_widget(
            FeedScreen::new(&self.feed, picker, &self.theme, Utc::now()),
            body,
            &mut self.feed_state,
        );

        if let Some(detail) = &mut self.detail {
            let feedback = self.transition.feedback();
            let dim = (feedback.background_opacity * self.transition.zoom_progress()).clamp(0.0, 1.0);
            if dim >= 1.0 {
                frame.render_widget(Clear, body);
                frame.render_widget(Block::default().bg(self.theme.backdrop), body);
            } else {
                ColorConverter::fade_area(frame.buffer_mut(), body, 1.0 - dim);
            }

            let rect = self.transition.zoom_rect(body);
            let offset_rows = self.drag.rows_for(feedback.offset);
            frame.render_stateful_widget(
                DetailScreen::new(&self.feed, picker, &self.theme).feedback(feedback, offset_rows),
                rect,
                detail,
            );
        }

        let scope = self.scope();
        let actions = match scope {
            Scope::Feed => FEED_HINTS,
            Scope::Detail => DETAIL_HINTS,
        };
        let hints = self.commands.hints(scope, actions);
        let info = self.footer_info();
        frame.render_widget(
            FooterBar::new(self.transition.phase(), &hints)
                .info(Some(&info))
                .style(FooterBarStyle::from_theme(&self.theme)),
            footer,
        );
    }

    fn footer_info(&self) -> String {
        match self.transition.phase() {
            Phase::Feed => format!("{} stories", self.feed.len()),
            Phase::Dragging
                if self.transition.offset() > self.transition.config().dismiss_threshold =>
            {
                "release to close".to_string()
            }
            Phase::Open | Phase::Dragging if self.mouse => "drag down to dismiss".to_string(),
            Phase::Open | Phase::Dragging => String::new(),
        }
    }
}

fn request_image(loader: &ImageLoader, slot: &mut ImageSlot) {
    let outcome = loader.request(slot);
    trace!(url = ?slot.url(), requester = %slot.requester(), ?outcome, "Image requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sample_articles::sample_articles;
    use crate::domain::ports::mocks::MockImageFetcher;
    use crate::infrastructure::{ImageLoaderConfig, MemoryImageCache, ui_queue};
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers, MouseButton};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    const FIRST_URL: &str = "https://picsum.photos/800/600?random=1";

    struct Harness {
        app: App,
        fetcher: Arc<MockImageFetcher>,
        terminal: Terminal<TestBackend>,
    }

    impl Harness {
        fn new(config: &AppConfig) -> Self {
            let fetcher = Arc::new(MockImageFetcher::new().with_png(FIRST_URL));
            let (handle, queue) = ui_queue();
            let loader = ImageLoader::new(
                ImageLoaderConfig::default(),
                Arc::new(MemoryImageCache::unbounded()),
                fetcher.clone(),
                handle,
            );
            let feed = FeedService::new(sample_articles(Utc::now()));
            let app = App::new(config, feed, loader, queue, ImageManager::halfblocks());
            let terminal = Terminal::new(TestBackend::new(80, 40)).expect("terminal");
            Self {
                app,
                fetcher,
                terminal,
            }
        }

        fn draw(&mut self) {
            let app = &mut self.app;
            self.terminal.draw(|frame| app.render(frame)).expect("draw");
        }

        fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> EventResult {
            let result = self.app.handle_key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            });
            self.draw();
            result
        }

        fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
            self.app.handle_mouse(&MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            });
            self.draw();
        }

        fn settle(&mut self) {
            for _ in 0..200 {
                self.app.tick(Duration::from_millis(16));
            }
            self.draw();
        }

        fn open_first(&mut self) {
            self.draw();
            self.key(KeyCode::Enter, KeyModifiers::NONE);
            self.settle();
        }
    }

    #[tokio::test]
    async fn test_enter_opens_selected_article() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();

        assert_eq!(h.app.transition.phase(), Phase::Open);
        assert_eq!(
            h.app.detail.as_ref().map(|d| d.article().as_str()),
            Some("a1")
        );
        assert!(!h.app.is_animating());
    }

    #[tokio::test]
    async fn test_escape_closes_then_quits() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();

        assert_eq!(h.key(KeyCode::Esc, KeyModifiers::NONE), EventResult::Consumed);
        assert!(h.app.detail.is_none());
        assert_eq!(h.app.transition.phase(), Phase::Feed);

        assert_eq!(h.key(KeyCode::Esc, KeyModifiers::NONE), EventResult::Exit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_detail() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();
        assert_eq!(
            h.key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            EventResult::Exit
        );
    }

    #[tokio::test]
    async fn test_long_drag_dismisses() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();

        h.mouse(MouseEventKind::Down(MouseButton::Left), 40, 20);
        h.mouse(MouseEventKind::Drag(MouseButton::Left), 40, 24);
        assert_eq!(h.app.transition.phase(), Phase::Dragging);
        h.mouse(MouseEventKind::Up(MouseButton::Left), 40, 26);

        assert_eq!(h.app.transition.phase(), Phase::Feed);
        assert!(h.app.detail.is_none());
    }

    #[tokio::test]
    async fn test_footer_tracks_drag_past_threshold() {
        let mut h = Harness::new(&AppConfig::default());
        assert_eq!(h.app.footer_info(), "4 stories");
        h.open_first();
        assert_eq!(h.app.footer_info(), "drag down to dismiss");

        h.mouse(MouseEventKind::Down(MouseButton::Left), 40, 20);
        h.mouse(MouseEventKind::Drag(MouseButton::Left), 40, 27);
        assert_eq!(h.app.footer_info(), "release to close");
    }

    #[tokio::test]
    async fn test_short_drag_springs_back() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();

        h.mouse(MouseEventKind::Down(MouseButton::Left), 40, 20);
        h.mouse(MouseEventKind::Drag(MouseButton::Left), 40, 22);
        h.mouse(MouseEventKind::Up(MouseButton::Left), 40, 22);

        assert_eq!(h.app.transition.phase(), Phase::Open);
        assert!(h.app.is_animating());
        h.settle();
        assert!(h.app.transition.offset().abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_scroll_is_ignored_while_dragging() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();

        h.mouse(MouseEventKind::Down(MouseButton::Left), 40, 20);
        h.mouse(MouseEventKind::Drag(MouseButton::Left), 40, 21);
        h.key(KeyCode::Char('j'), KeyModifiers::NONE);
        h.mouse(MouseEventKind::ScrollDown, 40, 21);

        assert_eq!(h.app.detail.as_ref().map(DetailScreenState::scroll), Some(0));
    }

    #[tokio::test]
    async fn test_close_button_click() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();

        h.mouse(MouseEventKind::Down(MouseButton::Left), 3, 1);
        assert_eq!(h.app.transition.phase(), Phase::Feed);
    }

    #[tokio::test]
    async fn test_mouse_disabled_ignores_clicks() {
        let config = AppConfig {
            mouse: false,
            ..AppConfig::default()
        };
        let mut h = Harness::new(&config);
        h.draw();

        let result = h.app.handle_terminal_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }));

        assert_eq!(result, EventResult::Continue);
        assert!(h.app.detail.is_none());
    }

    #[tokio::test]
    async fn test_feed_image_completion_reaches_card() {
        let mut h = Harness::new(&AppConfig::default());
        h.app.request_feed_images();

        let mut ready = false;
        for _ in 0..4 {
            let event = h.app.ui_queue.next().await.expect("event");
            h.app.handle_image_loaded(&event);
            ready |= event.url == FIRST_URL && event.result.is_ok();
        }

        assert!(ready);
        assert_eq!(h.fetcher.total_calls(), 4);
    }

    #[tokio::test]
    async fn test_hero_completion_after_close_is_dropped() {
        let mut h = Harness::new(&AppConfig::default());
        h.open_first();
        let hero = h
            .app
            .detail
            .as_mut()
            .and_then(|detail| detail.images_mut().next().map(|view| view.requester()))
            .expect("hero view");

        h.key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(h.app.detail.is_none());

        let mut hero_event = None;
        for _ in 0..4 {
            let event = h.app.ui_queue.next().await.expect("event");
            if event.requester == hero {
                hero_event = Some(event);
                break;
            }
        }
        let event = hero_event.expect("hero completion");
        assert_eq!(event.url, FIRST_URL);
        assert!(event.result.is_ok());

        h.app.handle_image_loaded(&event);
        h.draw();

        assert!(h.app.detail.is_none());
        assert_eq!(h.app.transition.phase(), Phase::Feed);
        assert!(
            h.app
                .feed_state
                .cards_mut()
                .all(|card| card.image.slot().status().shows_placeholder())
        );
        assert!(!h.app.feed_state.apply(&event));
        assert_eq!(h.fetcher.calls_for(FIRST_URL), 1);
    }

    #[tokio::test]
    async fn test_disabled_animations_open_instantly() {
        let mut config = AppConfig::default();
        config.ui.enable_animations = false;
        let mut h = Harness::new(&config);
        h.draw();
        h.key(KeyCode::Enter, KeyModifiers::NONE);

        assert!((h.app.transition.zoom_progress() - 1.0).abs() < f32::EPSILON);
        assert!(!h.app.is_animating());
    }
}
