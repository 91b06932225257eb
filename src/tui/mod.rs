//! Terminal user interface: state, event loop and screen layout.
//!
//! `AppState` owns the keyboard controller. Widgets render from it and the
//! handlers mutate it; nothing else holds UI state.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod clipboard;
pub mod component;
pub mod handlers;
pub mod help_overlay;
pub mod keyboard;
pub mod layout_switcher;
pub mod output_view;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::keyboard::{sound, VirtualKeyboard};
use crate::models::Position;
use crate::shortcuts::ShortcutRegistry;

// Re-export TUI components
pub use clipboard::{MemoryClipboard, SystemClipboard, TextClipboard};
pub use component::Component;
pub use help_overlay::{HelpEvent, HelpOverlay};
pub use keyboard::KeyboardWidget;
pub use layout_switcher::LayoutSwitcher;
pub use output_view::OutputView;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Frames a key stays highlighted after being pressed (100ms each).
const FLASH_FRAMES: u8 = 3;

/// Application state - single source of truth
pub struct AppState {
    /// Keyboard controller with the typed text
    pub keyboard: VirtualKeyboard,
    /// User configuration
    pub config: Config,
    /// Active color theme
    pub theme: Theme,
    /// Shortcut bindings
    pub shortcuts: ShortcutRegistry,
    /// Open help overlay
    pub help: Option<HelpOverlay>,

    /// Status message shown in the status bar
    pub status_message: String,
    /// Error message shown in the status bar
    pub error_message: Option<String>,

    /// Whether key presses play the sound cue
    pub sound_enabled: bool,
    /// Key under a held mouse button
    pub pressed_key: Option<Position>,
    /// Recently activated key and remaining highlight frames
    pub flash_highlight: Option<(Position, u8)>,
    /// Target of the copy shortcut
    pub clipboard: Box<dyn TextClipboard>,

    /// Set when the user quits
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state for a keyboard, applying the config's sound,
    /// theme and startup help settings.
    #[must_use]
    pub fn new(mut keyboard: VirtualKeyboard, config: Config) -> Self {
        let sound_enabled = config.sound.enabled;
        keyboard.set_sound(sound::from_setting(sound_enabled));

        let shortcuts = ShortcutRegistry::new();
        let help = config
            .ui
            .show_help_on_startup
            .then(|| HelpOverlay::new(&shortcuts, keyboard.layouts()));

        Self {
            keyboard,
            theme: Theme::from_mode(config.ui.theme_mode),
            config,
            shortcuts,
            help,
            status_message: String::new(),
            error_message: None,
            sound_enabled,
            pressed_key: None,
            flash_highlight: None,
            clipboard: Box::new(SystemClipboard::new()),
            should_quit: false,
        }
    }

    /// Replaces the copy target.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn TextClipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message.clear();
        self.error_message = None;
    }

    /// Reports the active layout in the status bar.
    pub fn announce_layout(&mut self) {
        let title = self.keyboard.current_layout().display_title().to_string();
        self.set_status(format!("Layout: {title}"));
    }

    /// Turns the key sound on or off.
    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        self.keyboard
            .set_sound(sound::from_setting(self.sound_enabled));
        self.set_status(if self.sound_enabled {
            "Key sound on"
        } else {
            "Key sound off"
        });
    }

    /// Highlights a key for a few frames.
    pub fn flash(&mut self, position: Position) {
        self.flash_highlight = Some((position, FLASH_FRAMES));
    }

    /// Whether a key is drawn as pressed.
    #[must_use]
    pub fn is_highlighted(&self, position: Position) -> bool {
        self.pressed_key == Some(position)
            || matches!(self.flash_highlight, Some((flashed, _)) if flashed == position)
    }

    /// Advances the flash highlight by one frame.
    pub fn tick(&mut self) {
        if let Some((position, frames)) = self.flash_highlight {
            self.flash_highlight = (frames > 1).then_some((position, frames - 1));
        }
    }
}

/// Screen regions, shared by rendering and pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar
    pub title: Rect,
    /// Layout switcher
    pub switcher: Rect,
    /// Keyboard
    pub keyboard: Rect,
    /// Typed text
    pub output: Rect,
    /// Status bar
    pub status: Rect,
}

impl ScreenAreas {
    /// Splits the screen for a keyboard with `row_count` rows.
    #[must_use]
    pub fn new(area: Rect, row_count: usize) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                 // Title bar
                Constraint::Length(3),                                 // Layout switcher
                Constraint::Length(KeyboardWidget::height_for(row_count)), // Keys
                Constraint::Min(3),                                    // Output
                Constraint::Length(StatusBar::HEIGHT),                 // Status bar
            ])
            .split(area);

        Self {
            title: chunks[0],
            switcher: chunks[1],
            keyboard: chunks[2],
            output: chunks[3],
            status: chunks[4],
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(stdout, PushKeyboardEnhancementFlags(keyboard_enhancement_flags()))
            .context("Failed to enable keyboard enhancement")?;
        tracing::debug!("keyboard enhancement enabled");
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Key reporting requested from terminals that support the kitty protocol.
///
/// Lone Shift and Caps Lock presses are only reported with
/// `REPORT_ALL_KEYS_AS_ESCAPE_CODES`. Event types keep held keys from
/// repeating as presses, and alternate keys keep `Shift+1` reported as `!`.
#[must_use]
pub fn keyboard_enhancement_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    // Terminals without the kitty protocol ignore the pop
    execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
        .context("Failed to disable keyboard enhancement")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui<B: Backend>(state: &mut AppState, terminal: &mut Terminal<B>) -> Result<()> {
    loop {
        state.tick();

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            let quit = match event::read()? {
                // Release and repeat reports would type the key twice
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handlers::handle_key_input(state, key)?
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let screen = Rect::new(0, 0, size.width, size.height);
                    handlers::handle_mouse_input(state, mouse, screen)?
                }
                // Resize and the rest re-render on the next loop
                _ => false,
            };
            if quit {
                break;
            }
        }

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
pub fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let areas = ScreenAreas::new(f.area(), state.keyboard.rows().len());

    render_title_bar(f, areas.title, state);
    LayoutSwitcher::render(f, areas.switcher, state);
    KeyboardWidget::render(f, areas.keyboard, state);
    OutputView::render(f, areas.output, state);
    StatusBar::render(f, areas.status, state);

    if let Some(help) = &state.help {
        help.render(f, centered_rect(60, 70, f.area()), &state.theme);
    }
}

/// Render title bar with the application name
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title_widget = Paragraph::new(format!(" {APP_NAME} - F1 for help "))
        .alignment(Alignment::Left)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::models::KeyLabel;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    };
    use ratatui::backend::TestBackend;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn app() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        config.sound.enabled = false;
        let keyboard = VirtualKeyboard::with_builtin_layouts().unwrap();
        AppState::new(keyboard, config).with_clipboard(Box::new(MemoryClipboard::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Screen cell in the middle of the displayed key with this label.
    fn key_center(state: &AppState, label: &str) -> (u16, u16) {
        let areas = ScreenAreas::new(SCREEN, state.keyboard.rows().len());
        let rows = state.keyboard.rows();
        let wanted = KeyLabel::parse(label);
        KeyboardWidget::key_rects(KeyboardWidget::inner(areas.keyboard), rows)
            .into_iter()
            .find(|(p, _)| rows[p.row][p.col] == wanted)
            .map(|(_, rect)| (rect.x + rect.width / 2, rect.y + 1))
            .unwrap()
    }

    fn click(state: &mut AppState, label: &str) {
        let (column, row) = key_center(state, label);
        let left = MouseButton::Left;
        handlers::handle_mouse_input(state, mouse(MouseEventKind::Down(left), column, row), SCREEN)
            .unwrap();
        handlers::handle_mouse_input(state, mouse(MouseEventKind::Up(left), column, row), SCREEN)
            .unwrap();
    }

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(SCREEN.width, SCREEN.height)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_click_types_and_one_shot_shift() {
        let mut state = app();

        click(&mut state, "a");
        click(&mut state, "Shift");
        assert!(state.keyboard.state().shift);
        // The shifted row-set is displayed now
        click(&mut state, "A");
        assert!(!state.keyboard.state().shift);

        assert_eq!(state.keyboard.text(), "aA");
    }

    #[test]
    fn test_release_elsewhere_cancels_press() {
        let mut state = app();
        let (column, row) = key_center(&state, "q");
        let left = MouseButton::Left;

        handlers::handle_mouse_input(&mut state, mouse(MouseEventKind::Down(left), column, row), SCREEN)
            .unwrap();
        assert!(state.pressed_key.is_some());
        handlers::handle_mouse_input(&mut state, mouse(MouseEventKind::Up(left), 0, 0), SCREEN)
            .unwrap();

        assert_eq!(state.keyboard.text(), "");
        assert!(state.pressed_key.is_none());
    }

    #[test]
    fn test_click_switcher_changes_layout() {
        let mut state = app();
        let areas = ScreenAreas::new(SCREEN, state.keyboard.rows().len());
        let inner = LayoutSwitcher::inner(areas.switcher);
        let (_, numpad) = LayoutSwitcher::button_rects(inner, state.keyboard.layouts())[1];

        handlers::handle_mouse_input(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), numpad.x + 1, numpad.y),
            SCREEN,
        )
        .unwrap();

        assert_eq!(state.keyboard.state().current_layout, "numpad");
        assert_eq!(state.status_message, "Layout: Numpad");
    }

    #[test]
    fn test_physical_keys_type() {
        let mut state = app();
        for code in [KeyCode::Char('h'), KeyCode::Char('i'), KeyCode::Enter] {
            handlers::handle_key_input(&mut state, key(code)).unwrap();
        }
        assert_eq!(state.keyboard.text(), "hi\n");
        assert!(state.flash_highlight.is_some());
    }

    #[test]
    fn test_unbound_chords_do_not_type() {
        let mut state = app();
        handlers::handle_key_input(&mut state, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT))
            .unwrap();
        assert_eq!(state.keyboard.text(), "");
    }

    #[test]
    fn test_function_keys_select_layouts() {
        let mut state = app();
        handlers::handle_key_input(&mut state, key(KeyCode::F(3))).unwrap();
        assert_eq!(state.keyboard.state().current_layout, "numpad");

        handlers::handle_key_input(&mut state, key(KeyCode::F(9))).unwrap();
        assert_eq!(state.keyboard.state().current_layout, "numpad");
        assert!(state.error_message.is_some());

        handlers::handle_key_input(&mut state, ctrl('n')).unwrap();
        assert_eq!(state.keyboard.state().current_layout, "standard");
    }

    #[test]
    fn test_copy_output() {
        let mut state = app();
        handlers::handle_key_input(&mut state, ctrl('y')).unwrap();
        assert_eq!(state.status_message, "Nothing to copy");

        handlers::handle_key_input(&mut state, key(KeyCode::Char('x'))).unwrap();
        handlers::handle_key_input(&mut state, ctrl('y')).unwrap();
        assert_eq!(state.status_message, "Copied 1 characters to clipboard");
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut state = app();
        handlers::handle_key_input(&mut state, key(KeyCode::F(1))).unwrap();
        assert!(state.help.is_some());

        // Typing is blocked while help is open
        handlers::handle_key_input(&mut state, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(state.keyboard.text(), "");

        handlers::handle_key_input(&mut state, key(KeyCode::Esc)).unwrap();
        assert!(state.help.is_none());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_help_closes_on_its_own_keys() {
        let mut state = app();
        handlers::handle_key_input(&mut state, key(KeyCode::F(1))).unwrap();

        handlers::handle_key_input(&mut state, key(KeyCode::Down)).unwrap();
        assert!(state.help.is_some());

        handlers::handle_key_input(&mut state, key(KeyCode::Char('q'))).unwrap();
        assert!(state.help.is_none());
        assert!(!state.should_quit);
        assert_eq!(state.keyboard.text(), "");
    }

    #[test]
    fn test_lone_modifier_keys_press_shift_and_caps() {
        let flags = keyboard_enhancement_flags();
        assert!(flags.contains(KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES));
        assert!(flags.contains(KeyboardEnhancementFlags::REPORT_EVENT_TYPES));

        let mut state = app();
        let shift = KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyModifiers::SHIFT,
        );
        handlers::handle_key_input(&mut state, shift).unwrap();
        assert!(state.keyboard.state().shift);
        handlers::handle_key_input(&mut state, key(KeyCode::Char('1'))).unwrap();
        handlers::handle_key_input(&mut state, key(KeyCode::Char('!'))).unwrap();
        // '1' is not displayed while shifted; '!' is and consumes the shift
        assert_eq!(state.keyboard.text(), "!");
        assert!(!state.keyboard.state().shift);

        handlers::handle_key_input(&mut state, key(KeyCode::CapsLock)).unwrap();
        assert!(state.keyboard.state().caps);
        handlers::handle_key_input(&mut state, key(KeyCode::Char('b'))).unwrap();
        assert_eq!(state.keyboard.text(), "!B");
    }

    #[test]
    fn test_quit_shortcuts() {
        let mut state = app();
        assert!(handlers::handle_key_input(&mut state, key(KeyCode::Esc)).unwrap());
        assert!(state.should_quit);

        let mut state = app();
        assert!(handlers::handle_key_input(&mut state, ctrl('q')).unwrap());
    }

    #[test]
    fn test_toggle_sound() {
        let mut state = app();
        assert!(!state.sound_enabled);
        handlers::handle_key_input(&mut state, ctrl('s')).unwrap();
        assert!(state.sound_enabled);
        assert_eq!(state.status_message, "Key sound on");
    }

    #[test]
    fn test_flash_expires() {
        let mut state = app();
        state.flash(Position::new(0, 0));
        for _ in 0..FLASH_FRAMES {
            assert!(state.is_highlighted(Position::new(0, 0)));
            state.tick();
        }
        assert!(!state.is_highlighted(Position::new(0, 0)));
    }

    #[test]
    fn test_render_shows_layout_and_text() {
        let mut state = app();
        handlers::handle_key_input(&mut state, key(KeyCode::Char('z'))).unwrap();

        let screen = screen_text(&state);
        assert!(screen.contains("Softkeys"));
        assert!(screen.contains("[ Standard ]"));
        assert!(screen.contains("Backspace"));
        assert!(screen.contains("Output (1 chars)"));
        assert!(screen.contains("SHIFT"));
    }

    #[test]
    fn test_render_follows_wrapped_output() {
        let mut state = app();
        // Eleven full rows of the 98-column pane, then a few more characters
        for _ in 0..98 * 11 {
            state.keyboard.press(&KeyLabel::parse("a"));
        }
        for _ in 0..3 {
            state.keyboard.press(&KeyLabel::parse("z"));
        }

        let screen = screen_text(&state);
        assert!(screen.contains("zzz"), "newest text scrolled out of the output pane");
    }

    #[test]
    fn test_render_shifted_rows() {
        let mut state = app();
        click(&mut state, "Shift");

        let screen = screen_text(&state);
        assert!(screen.contains('!'));
        assert!(screen.contains('{'));
        assert!(!screen.contains('`'));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut state = app();
        handlers::handle_key_input(&mut state, key(KeyCode::F(1))).unwrap();
        let screen = screen_text(&state);
        assert!(screen.contains("Shortcuts"));
    }
}
