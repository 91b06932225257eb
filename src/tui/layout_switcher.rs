//! Row of layout buttons above the keyboard.

use ratatui::{
    layout::{Position as ScreenPosition, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::AppState;
use crate::models::LayoutSet;

/// Layout switcher widget.
pub struct LayoutSwitcher;

impl LayoutSwitcher {
    /// Screen rectangles of each layout button, in declaration order.
    ///
    /// Buttons are `[ Title ]` separated by one space, starting at the left
    /// of `inner`. Buttons that do not fit are dropped.
    #[must_use]
    pub fn button_rects(inner: Rect, layouts: &LayoutSet) -> Vec<(usize, Rect)> {
        let mut rects = Vec::new();
        let right = inner.x.saturating_add(inner.width);
        let mut x = inner.x;

        for (index, layout) in layouts.layouts().iter().enumerate() {
            let width = Self::button_text(layout.display_title()).chars().count() as u16;
            if x.saturating_add(width) > right {
                break;
            }
            rects.push((index, Rect::new(x, inner.y, width, 1)));
            x = x.saturating_add(width + 1);
        }

        rects
    }

    /// Index of the layout button under a screen cell.
    #[must_use]
    pub fn button_at(inner: Rect, layouts: &LayoutSet, column: u16, row: u16) -> Option<usize> {
        let cell = ScreenPosition::new(column, row);
        Self::button_rects(inner, layouts)
            .into_iter()
            .find(|(_, rect)| rect.contains(cell))
            .map(|(index, _)| index)
    }

    /// Inner area of the switcher block.
    #[must_use]
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    fn button_text(title: &str) -> String {
        format!("[ {title} ]")
    }

    /// Render the switcher
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let keyboard = &state.keyboard;
        let current = &keyboard.state().current_layout;

        let mut spans = Vec::new();
        for (index, layout) in keyboard.layouts().layouts().iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if layout.name == *current {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_secondary)
            };
            spans.push(Span::styled(
                Self::button_text(layout.display_title()),
                style,
            ));
        }

        let switcher = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(" Layouts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(switcher, area);
    }
}
