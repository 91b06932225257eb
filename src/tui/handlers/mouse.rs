//! Pointer input handler.
//!
//! A key is activated when the left button goes down and comes back up on
//! the same key. Releasing elsewhere cancels the press.

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::shortcuts::Action;
use crate::tui::{AppState, KeyboardWidget, LayoutSwitcher, ScreenAreas};

/// Handle a mouse event on a screen of size `screen`.
pub fn handle_mouse_input(state: &mut AppState, mouse: MouseEvent, screen: Rect) -> Result<bool> {
    let areas = ScreenAreas::new(screen, state.keyboard.rows().len());
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.clear_messages();

            if state.help.is_some() {
                state.help = None;
                return Ok(false);
            }

            let switcher = LayoutSwitcher::inner(areas.switcher);
            if let Some(index) =
                LayoutSwitcher::button_at(switcher, state.keyboard.layouts(), column, row)
            {
                return super::dispatch_action(state, Action::SelectLayout(index));
            }

            let keys = KeyboardWidget::inner(areas.keyboard);
            state.pressed_key = KeyboardWidget::key_at(keys, state.keyboard.rows(), column, row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(pressed) = state.pressed_key.take() else {
                return Ok(false);
            };

            let keys = KeyboardWidget::inner(areas.keyboard);
            if KeyboardWidget::key_at(keys, state.keyboard.rows(), column, row) == Some(pressed) {
                state.keyboard.press_at(pressed);
                state.flash(pressed);
            } else {
                tracing::trace!(?pressed, "press cancelled");
            }
        }
        _ => {}
    }

    Ok(false)
}
