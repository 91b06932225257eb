//! Resolves displayed rows and key effects from layout, shift and caps.

use crate::models::{ControlKey, KeyEffect, KeyLabel, KeyRow, Layout};

/// Stateless key resolution.
///
/// Callers own the shift/caps flags; this type only maps them to rows and
/// effects. Applying the one-shot shift reset is the controller's job.
pub struct KeyLayoutResolver;

impl KeyLayoutResolver {
    /// Rows to render for `layout`.
    ///
    /// Returns the shift row-set when `shift` is true and the layout has
    /// one, otherwise the default row-set.
    #[must_use]
    pub fn rows(layout: &Layout, shift: bool) -> &[KeyRow] {
        layout.rows(shift)
    }

    /// Effect of pressing `label` under the given flags.
    ///
    /// Printable labels are uppercased when exactly one of `shift` and
    /// `caps` is set.
    #[must_use]
    pub fn char_for(label: &KeyLabel, shift: bool, caps: bool) -> KeyEffect {
        match label {
            KeyLabel::Control(key) => Self::control_effect(*key),
            KeyLabel::Printable(text) => {
                if shift != caps {
                    KeyEffect::Insert(text.to_uppercase())
                } else {
                    KeyEffect::Insert(text.clone())
                }
            }
        }
    }

    /// Fixed effect of a control key.
    #[must_use]
    pub fn control_effect(key: ControlKey) -> KeyEffect {
        match key {
            ControlKey::Backspace => KeyEffect::DeleteLast,
            ControlKey::Space => KeyEffect::Insert(" ".to_string()),
            ControlKey::Enter => KeyEffect::Insert("\n".to_string()),
            ControlKey::Tab => KeyEffect::Insert("\t".to_string()),
            ControlKey::Shift => KeyEffect::ToggleShift,
            ControlKey::Caps => KeyEffect::ToggleCaps,
            ControlKey::Ctrl | ControlKey::Alt => KeyEffect::Nothing,
        }
    }
}
