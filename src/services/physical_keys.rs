//! Mapping from physical key presses to labels on the displayed layout.

use crossterm::event::{KeyCode, ModifierKeyCode};

use crate::models::{ControlKey, KeyLabel, Layout, Position};

/// A physical key the keyboard knows how to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalKey {
    /// A character key (space included)
    Char(char),
    /// Return
    Enter,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Caps Lock (reported only by terminals with keyboard enhancement)
    CapsLock,
    /// Left or right shift (reported only by terminals with keyboard enhancement)
    Shift,
}

impl PhysicalKey {
    /// Converts a crossterm key code. Keys the keyboard never types return `None`.
    #[must_use]
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(c) => Some(Self::Char(c)),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Tab => Some(Self::Tab),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::CapsLock => Some(Self::CapsLock),
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                Some(Self::Shift)
            }
            _ => None,
        }
    }

    /// Control key this physical key stands for, if any.
    const fn control(self) -> Option<ControlKey> {
        match self {
            Self::Char(' ') => Some(ControlKey::Space),
            Self::Char(_) => None,
            Self::Enter => Some(ControlKey::Enter),
            Self::Tab => Some(ControlKey::Tab),
            Self::Backspace => Some(ControlKey::Backspace),
            Self::CapsLock => Some(ControlKey::Caps),
            Self::Shift => Some(ControlKey::Shift),
        }
    }
}

/// Finds the on-screen key a physical key press activates.
///
/// Character keys match printable labels of the displayed row-set
/// case-insensitively, so the key that is pressed is the one currently
/// shown. Named keys match their control labels. A key that is not on the
/// displayed layout matches nothing.
pub struct PhysicalKeyMap;

impl PhysicalKeyMap {
    /// Looks up the displayed key for `key`.
    #[must_use]
    pub fn lookup<'a>(
        layout: &'a Layout,
        shift: bool,
        key: PhysicalKey,
    ) -> Option<(Position, &'a KeyLabel)> {
        let wanted = key.control();
        let lowered = match key {
            PhysicalKey::Char(c) if wanted.is_none() => Some(c.to_lowercase().collect::<String>()),
            _ => None,
        };

        layout
            .rows(shift)
            .iter()
            .enumerate()
            .flat_map(|(row, labels)| {
                labels
                    .iter()
                    .enumerate()
                    .map(move |(col, label)| (Position::new(row, col), label))
            })
            .find(|(_, label)| match (label, wanted, lowered.as_deref()) {
                (KeyLabel::Control(control), Some(wanted), _) => *control == wanted,
                (KeyLabel::Printable(text), None, Some(lowered)) => text.to_lowercase() == lowered,
                _ => false,
            })
    }
}
