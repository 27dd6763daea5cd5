use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,

    // Feed
    NavigateUp,
    NavigateDown,
    SelectFirst,
    SelectLast,
    Open,

    // Detail
    Close,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
}

impl Action {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::NavigateUp => "Up",
            Self::NavigateDown => "Down",
            Self::SelectFirst => "First",
            Self::SelectLast => "Last",
            Self::Open => "Open",
            Self::Close => "Close",
            Self::ScrollUp => "Scroll up",
            Self::ScrollDown => "Scroll down",
            Self::ScrollToTop => "Top",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
        }
    }
}
