//! Shortcut action dispatch.

use anyhow::Result;

use crate::shortcuts::Action;
use crate::tui::{AppState, HelpOverlay};

/// Runs a shortcut action. Returns `Ok(true)` when the app should quit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    tracing::debug!(?action, "dispatching action");

    match action {
        Action::Quit => {
            state.should_quit = true;
            return Ok(true);
        }
        Action::ToggleHelp => {
            state.help = match state.help {
                Some(_) => None,
                None => Some(HelpOverlay::new(
                    &state.shortcuts,
                    state.keyboard.layouts(),
                )),
            };
        }
        Action::Cancel => state.help = None,
        Action::NextLayout => {
            state.keyboard.cycle_layout();
            state.announce_layout();
        }
        Action::SelectLayout(index) => select_layout(state, index)?,
        Action::CopyOutput => copy_output(state),
        Action::ToggleSound => state.toggle_sound(),
    }

    Ok(false)
}

fn select_layout(state: &mut AppState, index: usize) -> Result<()> {
    let Some(name) = state
        .keyboard
        .layouts()
        .layouts()
        .get(index)
        .map(|layout| layout.name.clone())
    else {
        state.set_error(format!("No layout on F{}", index + 2));
        return Ok(());
    };

    state.keyboard.switch_layout(&name)?;
    state.announce_layout();
    Ok(())
}

fn copy_output(state: &mut AppState) {
    let text = state.keyboard.text().to_string();
    if text.is_empty() {
        state.set_status("Nothing to copy");
        return;
    }

    match state.clipboard.set_text(&text) {
        Ok(()) => {
            let count = state.keyboard.output().char_count();
            state.set_status(format!("Copied {count} characters to clipboard"));
        }
        Err(e) => {
            tracing::warn!("clipboard copy failed: {e:#}");
            state.set_error(format!("{e:#}"));
        }
    }
}
