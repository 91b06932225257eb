//! Pane showing the text typed so far.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::AppState;

/// Output pane widget.
pub struct OutputView;

impl OutputView {
    /// Lines of the pane: one per typed line, with a cursor on the last.
    fn lines(text: &str, cursor: Style) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = text
            .split('\n')
            .map(|line| Line::from(line.replace('\t', "    ")))
            .collect();

        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(" ", cursor));
        }
        lines
    }

    /// Render the output pane, scrolled so the cursor line stays visible.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let text = state.keyboard.text();

        let block = Block::default()
            .title(format!(" Output ({} chars) ", state.keyboard.output().char_count()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);

        let paragraph = if text.is_empty() {
            Paragraph::new(Span::styled(
                "Click a key or start typing",
                Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
            ))
            .wrap(Wrap { trim: false })
        } else {
            let paragraph = Paragraph::new(Self::lines(text, Style::default().bg(theme.text)))
                .style(Style::default().fg(theme.text))
                .wrap(Wrap { trim: false });
            // Scroll by wrapped screen rows, not by typed lines
            let rows = paragraph.line_count(inner.width);
            let scroll = rows.saturating_sub(inner.height as usize);
            paragraph.scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        };

        f.render_widget(paragraph.block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_on_newline() {
        let lines = OutputView::lines("ab\ncd", Style::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "ab");
        assert_eq!(lines[1].to_string(), "cd ");
    }

    #[test]
    fn test_tabs_expand() {
        let lines = OutputView::lines("a\tb", Style::default());
        assert_eq!(lines[0].to_string(), "a    b ");
    }

    #[test]
    fn test_trailing_newline_starts_empty_line() {
        let lines = OutputView::lines("a\n", Style::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].to_string(), " ");
    }
}
