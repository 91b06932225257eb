//! Status bar widget: modifier indicators, messages and shortcut hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::shortcuts::{contexts, Action};

/// Number of shortcut hints shown at the bottom.
const MAX_HINTS: usize = 5;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Height of the status bar including borders.
    pub const HEIGHT: u16 = 4;

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        let message_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else if state.status_message.is_empty() {
            Self::hints_line(state, theme)
        } else {
            Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.success),
            ))
        };

        let status = Paragraph::new(vec![Self::indicator_line(state, theme), message_line])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Layout name, SHIFT/CAPS flags and sound state.
    fn indicator_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let input = state.keyboard.state();
        let flag = |on: bool, name: &'static str| {
            if on {
                Span::styled(
                    name,
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(name, Style::default().fg(theme.text_muted))
            }
        };

        Line::from(vec![
            Span::styled("Layout: ", Style::default().fg(theme.primary)),
            Span::styled(
                state.keyboard.current_layout().display_title().to_string(),
                Style::default().fg(theme.text),
            ),
            Span::raw("  "),
            flag(input.shift, "SHIFT"),
            Span::raw(" "),
            flag(input.caps, "CAPS"),
            Span::raw("  "),
            Span::styled("Sound: ", Style::default().fg(theme.primary)),
            Span::styled(
                if state.sound_enabled { "on" } else { "off" },
                Style::default().fg(theme.text),
            ),
        ])
    }

    /// First shortcuts of the active context.
    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context = if state.help.is_some() {
            contexts::HELP
        } else {
            contexts::MAIN
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        let hints = state
            .shortcuts
            .bindings(context)
            .filter(|(_, action)| !matches!(action, Action::SelectLayout(_)))
            .take(MAX_HINTS);

        for (i, (binding, action)) in hints.enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                binding.display(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                action.description(),
                Style::default().fg(theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}
