//! Shift/caps state and the active layout.

use serde::{Deserialize, Serialize};

use crate::models::layout::DEFAULT_LAYOUT;

/// Input state of the keyboard.
///
/// `shift` is one-shot: it clears after the next printable key. `caps`
/// stays on until toggled again. `current_layout` only changes through an
/// explicit layout switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Name of the active layout
    pub current_layout: String,
    /// One-shot shift flag
    pub shift: bool,
    /// Caps lock flag
    pub caps: bool,
}

impl InputState {
    /// Creates a state on the given layout with both toggles off.
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            current_layout: layout.into(),
            shift: false,
            caps: false,
        }
    }

    /// Flips shift.
    pub const fn toggle_shift(&mut self) {
        self.shift = !self.shift;
    }

    /// Flips caps.
    pub const fn toggle_caps(&mut self) {
        self.caps = !self.caps;
    }

    /// Clears shift after a character was produced.
    ///
    /// Returns true if shift was on.
    pub const fn consume_shift(&mut self) -> bool {
        let was_on = self.shift;
        self.shift = false;
        was_on
    }

    /// Whether printable keys produce uppercase (exactly one of shift/caps).
    #[must_use]
    pub const fn uppercase(&self) -> bool {
        self.shift != self.caps
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT)
    }
}
