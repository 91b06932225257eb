//! Key labels and the effects a key press produces.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Keys that act on input state or the output buffer instead of typing
/// their own label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// Deletes the last character of the output
    Backspace,
    /// Appends a space
    Space,
    /// Appends a newline
    Enter,
    /// Appends a tab character
    Tab,
    /// Toggles the one-shot shift
    Shift,
    /// Toggles caps lock
    Caps,
    /// Produces nothing
    Ctrl,
    /// Produces nothing
    Alt,
}

impl ControlKey {
    /// All control keys, in display order.
    pub const ALL: [Self; 8] = [
        Self::Backspace,
        Self::Space,
        Self::Enter,
        Self::Tab,
        Self::Shift,
        Self::Caps,
        Self::Ctrl,
        Self::Alt,
    ];

    /// The label text shown on the key.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Backspace => "Backspace",
            Self::Space => "Space",
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Shift => "Shift",
            Self::Caps => "Caps",
            Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
        }
    }

    /// Parses a label into a control key. Matching is exact.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Whether the key is drawn wider than a character key.
    #[must_use]
    pub const fn is_wide(&self) -> bool {
        !matches!(self, Self::Ctrl | Self::Alt)
    }
}

/// A single key label on a layout row.
///
/// Labels are parsed once when a layout is loaded. Anything that is not a
/// control key name is typed literally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyLabel {
    /// A key with a fixed effect
    Control(ControlKey),
    /// A key that types its own text
    Printable(String),
}

impl KeyLabel {
    /// Parses label text.
    pub fn parse(text: &str) -> Self {
        ControlKey::from_name(text).map_or_else(|| Self::Printable(text.to_string()), Self::Control)
    }

    /// Shortcut for a printable label.
    pub fn printable(text: impl Into<String>) -> Self {
        Self::Printable(text.into())
    }

    /// The text shown on the key.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Control(key) => key.name(),
            Self::Printable(text) => text,
        }
    }

    /// Returns the control key, if this is one.
    #[must_use]
    pub const fn control(&self) -> Option<ControlKey> {
        match self {
            Self::Control(key) => Some(*key),
            Self::Printable(_) => None,
        }
    }

    /// Whether the key is drawn wider than a character key.
    #[must_use]
    pub const fn is_wide(&self) -> bool {
        match self {
            Self::Control(key) => key.is_wide(),
            Self::Printable(_) => false,
        }
    }
}

impl fmt::Display for KeyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&str> for KeyLabel {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Serialize for KeyLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

impl<'de> Deserialize<'de> for KeyLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

/// What a key press does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEffect {
    /// Append text to the output
    Insert(String),
    /// Remove the last character of the output
    DeleteLast,
    /// Flip the shift flag
    ToggleShift,
    /// Flip the caps flag
    ToggleCaps,
    /// No effect
    Nothing,
}

impl KeyEffect {
    /// Whether this effect came from a printable key and consumes a one-shot shift.
    ///
    /// Space, Enter and Tab also insert text but leave shift armed.
    #[must_use]
    pub fn consumes_shift(&self, label: &KeyLabel) -> bool {
        matches!(self, Self::Insert(_)) && matches!(label, KeyLabel::Printable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control_labels() {
        for key in ControlKey::ALL {
            assert_eq!(KeyLabel::parse(key.name()), KeyLabel::Control(key));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        // Lowercase "shift" is not the Shift key
        assert_eq!(KeyLabel::parse("shift"), KeyLabel::printable("shift"));
        assert_eq!(KeyLabel::parse("a"), KeyLabel::printable("a"));
    }

    #[test]
    fn test_wide_keys() {
        assert!(KeyLabel::parse("Backspace").is_wide());
        assert!(KeyLabel::parse("Space").is_wide());
        assert!(!KeyLabel::parse("Ctrl").is_wide());
        assert!(!KeyLabel::parse("q").is_wide());
    }

    #[test]
    fn test_label_display_round_trip_text() {
        assert_eq!(KeyLabel::parse("Enter").to_string(), "Enter");
        assert_eq!(KeyLabel::parse("\\").to_string(), "\\");
    }

    #[test]
    fn test_consumes_shift_only_for_printable() {
        let insert = KeyEffect::Insert(" ".to_string());
        assert!(!insert.consumes_shift(&KeyLabel::Control(ControlKey::Space)));
        assert!(insert.consumes_shift(&KeyLabel::printable("a")));
        assert!(!KeyEffect::ToggleCaps.consumes_shift(&KeyLabel::Control(ControlKey::Caps)));
    }
}
