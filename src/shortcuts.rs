//! Centralized shortcut and action system.
//!
//! Application shortcuts sit on keys the on-screen keyboard never types
//! (function keys, Esc, Ctrl chords), so every other key press can be
//! forwarded to the keyboard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Shortcut contexts.
pub mod contexts {
    /// Main keyboard screen
    pub const MAIN: &str = "main";
    /// Help overlay is open
    pub const HELP: &str = "help";
}

/// Number of layouts reachable with a function key (F2..=F9).
pub const LAYOUT_HOTKEYS: u8 = 8;

/// Application actions bound to shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the application
    Quit,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Switch to the next layout
    NextLayout,
    /// Switch to the layout at this index
    SelectLayout(usize),
    /// Copy the typed text to the system clipboard
    CopyOutput,
    /// Turn the key sound on or off
    ToggleSound,
    /// Close the current overlay
    Cancel,
}

impl Action {
    /// Short description for the help overlay and status bar.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Quit => "Quit".to_string(),
            Self::ToggleHelp => "Toggle help".to_string(),
            Self::NextLayout => "Next layout".to_string(),
            Self::SelectLayout(index) => format!("Layout {}", index + 1),
            Self::CopyOutput => "Copy text to clipboard".to_string(),
            Self::ToggleSound => "Toggle key sound".to_string(),
            Self::Cancel => "Close".to_string(),
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable form, e.g. "Ctrl+Q" or "F2".
    #[must_use]
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{n}"),
            KeyCode::Esc => "Esc".to_string(),
            other => format!("{other:?}"),
        };

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else {
            key
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
    /// Registration order per context, for help listings
    order: Vec<(String, KeyBinding, Action)>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        };

        registry.register_main_shortcuts();
        registry.register_help_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::MAIN;

        self.register(ctx, K::F(1), M::NONE, Action::ToggleHelp);
        for index in 0..LAYOUT_HOTKEYS {
            self.register(ctx, K::F(index + 2), M::NONE, Action::SelectLayout(index as usize));
        }
        self.register(ctx, K::Char('n'), M::CONTROL, Action::NextLayout);
        self.register(ctx, K::Char('y'), M::CONTROL, Action::CopyOutput);
        self.register(ctx, K::Char('s'), M::CONTROL, Action::ToggleSound);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Esc, M::NONE, Action::Quit);
    }

    fn register_help_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::HELP;

        self.register(ctx, K::F(1), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
        self.order.push((context.to_string(), binding, action));
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Bindings of a context in registration order.
    pub fn bindings(&self, context: &str) -> impl Iterator<Item = (KeyBinding, Action)> + '_ {
        let context = context.to_string();
        self.order
            .iter()
            .filter(move |(ctx, _, _)| *ctx == context)
            .map(|(_, binding, action)| (*binding, *action))
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
