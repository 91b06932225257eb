//! Scrollable help overlay listing shortcuts and layouts.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::component::Component;
use super::Theme;
use crate::models::LayoutSet;
use crate::shortcuts::{contexts, Action, KeyBinding, ShortcutRegistry, LAYOUT_HOTKEYS};

/// Events emitted by the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpEvent {
    /// The overlay wants to close
    Close,
}

/// One entry of the help text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpLine {
    Heading(String),
    Entry(String, String),
    Blank,
}

/// Help overlay state and content.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    lines: Vec<HelpLine>,
    scroll_offset: usize,
}

impl HelpOverlay {
    /// Builds the help text from the registered shortcuts and the layouts.
    #[must_use]
    pub fn new(registry: &ShortcutRegistry, layouts: &LayoutSet) -> Self {
        let mut lines = vec![
            HelpLine::Heading("Typing".to_string()),
            HelpLine::Entry("Click".to_string(), "Press the key under the pointer".to_string()),
            HelpLine::Entry(
                "Keyboard".to_string(),
                "Press the matching on-screen key".to_string(),
            ),
            HelpLine::Entry("Shift".to_string(), "Uppercase the next character".to_string()),
            HelpLine::Entry("Caps".to_string(), "Uppercase until pressed again".to_string()),
            HelpLine::Blank,
            HelpLine::Heading("Shortcuts".to_string()),
        ];

        for (binding, action) in registry.bindings(contexts::MAIN) {
            // Layout hotkeys get their own section with real names
            if matches!(action, Action::SelectLayout(_)) {
                continue;
            }
            lines.push(HelpLine::Entry(binding.display(), action.description()));
        }

        lines.push(HelpLine::Blank);
        lines.push(HelpLine::Heading("Layouts".to_string()));
        for (index, layout) in layouts.layouts().iter().enumerate() {
            let key = if index < usize::from(LAYOUT_HOTKEYS) {
                KeyBinding::new(KeyCode::F(index as u8 + 2), crossterm::event::KeyModifiers::NONE)
                    .display()
            } else {
                "Ctrl+N".to_string()
            };
            lines.push(HelpLine::Entry(key, layout.display_title().to_string()));
        }

        Self {
            lines,
            scroll_offset: 0,
        }
    }

    /// Number of content lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.lines.len() {
            self.scroll_offset += 1;
        }
    }

    fn styled_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        self.lines
            .iter()
            .map(|line| match line {
                HelpLine::Heading(title) => Line::from(Span::styled(
                    title.clone(),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                HelpLine::Entry(key, action) => Line::from(vec![
                    Span::styled(
                        format!("  {key:<10}"),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(action.clone(), Style::default().fg(theme.text)),
                ]),
                HelpLine::Blank => Line::from(""),
            })
            .collect()
    }
}

impl Component for HelpOverlay {
    type Event = HelpEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Up => {
                self.scroll_up();
                None
            }
            KeyCode::Down => {
                self.scroll_down();
                None
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
                None
            }
            KeyCode::End => {
                self.scroll_offset = self.lines.len().saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char('q') => Some(HelpEvent::Close),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));

        let paragraph = Paragraph::new(self.styled_lines(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));
        f.render_widget(paragraph, area);

        let mut scrollbar_state =
            ScrollbarState::new(self.lines.len()).position(self.scroll_offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}
