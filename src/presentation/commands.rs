use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

/// Screen a binding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Feed,
    Detail,
}

impl Scope {
    const fn of(action: Action) -> Self {
        match action {
            Action::Quit
            | Action::NavigateUp
            | Action::NavigateDown
            | Action::SelectFirst
            | Action::SelectLast
            | Action::Open => Self::Feed,
            Action::Close | Action::ScrollUp | Action::ScrollDown | Action::ScrollToTop => {
                Self::Detail
            }
        }
    }
}

pub struct CommandRegistry {
    display_bindings: HashMap<(Scope, Action), KeyEvent>,
    input_bindings: Vec<(Scope, KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut registry = Self {
            display_bindings: HashMap::new(),
            input_bindings: Vec::new(),
        };

        let key = KeyEvent::new;

        registry.register(Action::Quit, key(KeyCode::Char('q'), KeyModifiers::NONE), true);
        registry.register(Action::Quit, key(KeyCode::Esc, KeyModifiers::NONE), false);
        registry.register(Action::Quit, key(KeyCode::Char('c'), KeyModifiers::CONTROL), false);

        registry.register(Action::NavigateDown, key(KeyCode::Char('j'), KeyModifiers::NONE), true);
        registry.register(Action::NavigateDown, key(KeyCode::Down, KeyModifiers::NONE), false);
        registry.register(Action::NavigateUp, key(KeyCode::Char('k'), KeyModifiers::NONE), true);
        registry.register(Action::NavigateUp, key(KeyCode::Up, KeyModifiers::NONE), false);
        registry.register(Action::SelectFirst, key(KeyCode::Char('g'), KeyModifiers::NONE), true);
        registry.register(Action::SelectFirst, key(KeyCode::Home, KeyModifiers::NONE), false);
        registry.register(Action::SelectLast, key(KeyCode::Char('G'), KeyModifiers::SHIFT), true);
        registry.register(Action::SelectLast, key(KeyCode::End, KeyModifiers::NONE), false);
        registry.register(Action::Open, key(KeyCode::Enter, KeyModifiers::NONE), true);
        registry.register(Action::Open, key(KeyCode::Char(' '), KeyModifiers::NONE), false);

        registry.register(Action::Close, key(KeyCode::Esc, KeyModifiers::NONE), true);
        registry.register(Action::Close, key(KeyCode::Char('x'), KeyModifiers::NONE), false);
        registry.register(Action::Close, key(KeyCode::Char('q'), KeyModifiers::NONE), false);
        registry.register(Action::ScrollDown, key(KeyCode::Char('j'), KeyModifiers::NONE), true);
        registry.register(Action::ScrollDown, key(KeyCode::Down, KeyModifiers::NONE), false);
        registry.register(Action::ScrollUp, key(KeyCode::Char('k'), KeyModifiers::NONE), true);
        registry.register(Action::ScrollUp, key(KeyCode::Up, KeyModifiers::NONE), false);
        registry.register(Action::ScrollToTop, key(KeyCode::Char('g'), KeyModifiers::NONE), true);

        registry
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default registry with user bindings layered on top.
    /// Overrides take precedence over defaults and become the displayed key.
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> Self {
        let mut registry = Self::default();
        for (spec, action) in overrides {
            match parse_key(spec) {
                Some(key) => registry.register_front(*action, key),
                None => warn!(binding = %spec, "Ignoring unparseable keybinding"),
            }
        }
        registry
    }

    fn register(&mut self, action: Action, key: KeyEvent, is_primary: bool) {
        let scope = Scope::of(action);
        if is_primary {
            self.display_bindings.insert((scope, action), key);
        }
        self.input_bindings.push((scope, key, action));
    }

    fn register_front(&mut self, action: Action, key: KeyEvent) {
        let scope = Scope::of(action);
        self.display_bindings.insert((scope, action), key);
        self.input_bindings.insert(0, (scope, key, action));
    }

    pub fn get(&self, scope: Scope, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&(scope, action)).copied()
    }

    pub fn find_action(&self, scope: Scope, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(s, k, _)| *s == scope && k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, _, a)| *a)
    }

    /// Footer hints for `actions`, in the given order.
    pub fn hints(&self, scope: Scope, actions: &[Action]) -> Vec<Keybind> {
        actions
            .iter()
            .filter_map(|&action| {
                self.get(scope, action)
                    .map(|key| Keybind::new(key, action, action.label()))
            })
            .collect()
    }
}

/// Parses bindings such as `"Ctrl+q"`, `"Alt+Enter"`, `"G"` or `"F1"`.
fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = spec.split('+').collect();
    let last = parts.pop()?;

    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "c" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "a" => modifiers |= KeyModifiers::ALT,
            "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match last.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "backspace" => KeyCode::Backspace,
        lower if lower.len() > 1 && lower.starts_with('f') => {
            KeyCode::F(lower[1..].parse().ok()?)
        }
        _ => {
            let mut chars = last.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if c.is_ascii_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyEvent::new(code, modifiers))
}
