//! Keyboard input handler.

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyModifiers};

use crate::services::PhysicalKey;
use crate::shortcuts::{contexts, Action};
use crate::tui::{AppState, Component, HelpEvent};

/// Handle a key press. Returns `Ok(true)` when the app should quit.
///
/// Shortcuts win over typing. Anything else is forwarded to the on-screen
/// key it matches, if one is displayed.
pub fn handle_key_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    state.clear_messages();

    if state.help.is_some() {
        return handle_help_input(state, key);
    }

    if let Some(action) = state.shortcuts.lookup(contexts::MAIN, key) {
        return super::dispatch_action(state, action);
    }

    // Unbound chords are not typing
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Ok(false);
    }

    let Some(physical) = PhysicalKey::from_key_code(key.code) else {
        return Ok(false);
    };

    match state.keyboard.press_physical(physical) {
        Some((position, _)) => state.flash(position),
        None => tracing::trace!(?physical, "key not on displayed layout"),
    }

    Ok(false)
}

fn handle_help_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match state.shortcuts.lookup(contexts::HELP, key) {
        Some(Action::ToggleHelp | Action::Cancel) => {
            state.help = None;
            Ok(false)
        }
        Some(action) => super::dispatch_action(state, action),
        None => {
            let event = state.help.as_mut().and_then(|help| help.handle_input(key));
            if let Some(HelpEvent::Close) = event {
                state.help = None;
            }
            Ok(false)
        }
    }
}
