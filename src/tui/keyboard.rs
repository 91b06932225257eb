//! Keyboard widget: draws the displayed rows and hit-tests pointer input.

use ratatui::{
    layout::{Alignment, Position as ScreenPosition, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::AppState;
use crate::models::{ControlKey, KeyLabel, KeyRow, Position};

/// Height of one key in cells (label line + borders).
pub const KEY_HEIGHT: u16 = 3;
/// Narrowest key, in cells.
const MIN_KEY_WIDTH: u16 = 5;
/// Space bar width, in cells.
const SPACE_WIDTH: u16 = 20;

/// Keyboard widget renders the keys of the active layout.
pub struct KeyboardWidget;

impl KeyboardWidget {
    /// Height needed to draw `row_count` rows inside a bordered block.
    #[must_use]
    pub fn height_for(row_count: usize) -> u16 {
        u16::try_from(row_count)
            .unwrap_or(u16::MAX)
            .saturating_mul(KEY_HEIGHT)
            .saturating_add(2)
    }

    /// Natural width of a key.
    fn key_width(label: &KeyLabel) -> u16 {
        match label {
            KeyLabel::Control(ControlKey::Space) => SPACE_WIDTH,
            other => u16::try_from(other.text().chars().count().saturating_add(4))
                .unwrap_or(u16::MAX)
                .max(MIN_KEY_WIDTH),
        }
    }

    /// Sum of key widths, saturating at `u16::MAX`.
    fn total_width(widths: &[u16]) -> u16 {
        let total: u64 = widths.iter().map(|&width| u64::from(width)).sum();
        u16::try_from(total).unwrap_or(u16::MAX)
    }

    /// Screen rectangles of every key, row by row.
    ///
    /// Rows are centered. A row that does not fit at natural widths falls
    /// back to equal widths. Keys outside `inner` are dropped.
    #[must_use]
    pub fn key_rects(inner: Rect, rows: &[KeyRow]) -> Vec<(Position, Rect)> {
        let mut rects = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }

            let offset = u16::try_from(row_index)
                .unwrap_or(u16::MAX)
                .saturating_mul(KEY_HEIGHT);
            let y = inner.y.saturating_add(offset);
            if y.saturating_add(KEY_HEIGHT) > inner.bottom() {
                break;
            }

            let natural: Vec<u16> = row.iter().map(Self::key_width).collect();
            let widths = if Self::total_width(&natural) <= inner.width {
                natural
            } else {
                let keys = u16::try_from(row.len()).unwrap_or(u16::MAX);
                vec![(inner.width / keys).max(1); row.len()]
            };
            let total = Self::total_width(&widths);

            let mut x = inner.x + inner.width.saturating_sub(total) / 2;
            for (col, width) in widths.into_iter().enumerate() {
                let rect = Rect::new(x, y, width, KEY_HEIGHT).intersection(inner);
                if !rect.is_empty() {
                    rects.push((Position::new(row_index, col), rect));
                }
                x = x.saturating_add(width);
            }
        }

        rects
    }

    /// Key under a screen cell, if any.
    #[must_use]
    pub fn key_at(inner: Rect, rows: &[KeyRow], column: u16, row: u16) -> Option<Position> {
        let cell = ScreenPosition::new(column, row);
        Self::key_rects(inner, rows)
            .into_iter()
            .find(|(_, rect)| rect.contains(cell))
            .map(|(position, _)| position)
    }

    /// Inner area of the keyboard block.
    #[must_use]
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    /// Render the keyboard widget
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let keyboard = &state.keyboard;
        let input = keyboard.state();
        let rows = keyboard.rows();

        let block = Block::default()
            .title(format!(" {} ", keyboard.current_layout().display_title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        for (position, rect) in Self::key_rects(inner, rows) {
            let label = &rows[position.row][position.col];
            let toggled = match label.control() {
                Some(ControlKey::Shift) => input.shift,
                Some(ControlKey::Caps) => input.caps,
                _ => false,
            };
            let highlighted = state.is_highlighted(position);

            let mut style = Style::default().bg(theme.surface).fg(if label.control().is_some() {
                theme.text_secondary
            } else {
                theme.text
            });
            if toggled {
                style = style.fg(theme.active).add_modifier(Modifier::BOLD);
            }
            if highlighted {
                style = style.bg(theme.accent).fg(theme.background);
            }

            let border_color = if toggled { theme.active } else { theme.text_muted };
            let key = Paragraph::new(label.text())
                .alignment(Alignment::Center)
                .style(style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );
            f.render_widget(key, rect);
        }
    }
}
