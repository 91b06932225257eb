//! Virtual keyboard controller.
//!
//! `VirtualKeyboard` owns the input state, the layouts, the output sink and
//! the sound cue. Every key activation goes through [`VirtualKeyboard::press`],
//! whether it came from a pointer, a physical key or a script.

pub mod output;
pub mod sound;

use anyhow::Result;

use crate::models::{InputState, KeyEffect, KeyLabel, KeyRow, Layout, LayoutSet, Position};
use crate::services::{KeyLayoutResolver, PhysicalKey, PhysicalKeyMap};

pub use output::{OutputSink, TextBuffer};
pub use sound::{KeySound, Silent, TerminalBell};

/// Keyboard controller. One instance per session.
pub struct VirtualKeyboard<S: OutputSink = TextBuffer> {
    layouts: LayoutSet,
    state: InputState,
    output: S,
    sound: Box<dyn KeySound>,
}

impl<S: OutputSink> VirtualKeyboard<S> {
    /// Creates a keyboard on the default layout (or the first declared one
    /// if the set has no default layout) with shift and caps off.
    pub fn new(layouts: LayoutSet, output: S, sound: Box<dyn KeySound>) -> Self {
        let start = if layouts.contains(crate::models::DEFAULT_LAYOUT) {
            crate::models::DEFAULT_LAYOUT.to_string()
        } else {
            layouts.first().name.clone()
        };

        Self {
            layouts,
            state: InputState::new(start),
            output,
            sound,
        }
    }

    /// Current input state.
    #[must_use]
    pub const fn state(&self) -> &InputState {
        &self.state
    }

    /// The output sink.
    #[must_use]
    pub const fn output(&self) -> &S {
        &self.output
    }

    /// Consumes the keyboard and returns its output sink.
    #[must_use]
    pub fn into_output(self) -> S {
        self.output
    }

    /// All layouts the keyboard can switch to.
    #[must_use]
    pub const fn layouts(&self) -> &LayoutSet {
        &self.layouts
    }

    /// Replaces the sound cue.
    pub fn set_sound(&mut self, sound: Box<dyn KeySound>) {
        self.sound = sound;
    }

    /// The active layout.
    #[must_use]
    pub fn current_layout(&self) -> &Layout {
        self.layouts
            .get(&self.state.current_layout)
            .unwrap_or_else(|| self.layouts.first())
    }

    /// Rows currently displayed (shift applied).
    #[must_use]
    pub fn rows(&self) -> &[KeyRow] {
        KeyLayoutResolver::rows(self.current_layout(), self.state.shift)
    }

    /// Activates a key.
    ///
    /// Plays the cue, applies the key's effect to the output or the state,
    /// and clears a one-shot shift after a printable key.
    pub fn press(&mut self, label: &KeyLabel) -> KeyEffect {
        self.play_sound();

        let effect = KeyLayoutResolver::char_for(label, self.state.shift, self.state.caps);
        match &effect {
            KeyEffect::Insert(text) => self.output.append(text),
            KeyEffect::DeleteLast => self.output.truncate_last(),
            KeyEffect::ToggleShift => self.state.toggle_shift(),
            KeyEffect::ToggleCaps => self.state.toggle_caps(),
            KeyEffect::Nothing => {}
        }

        if effect.consumes_shift(label) && self.state.consume_shift() {
            tracing::trace!("one-shot shift released");
        }

        tracing::trace!(
            label = %label,
            ?effect,
            shift = self.state.shift,
            caps = self.state.caps,
            "key pressed"
        );
        effect
    }

    /// Activates the key at a position of the displayed rows.
    ///
    /// Returns `None` when no key is at that position.
    pub fn press_at(&mut self, position: Position) -> Option<KeyEffect> {
        let label = self
            .current_layout()
            .label_at(position, self.state.shift)?
            .clone();
        Some(self.press(&label))
    }

    /// Activates the displayed key matching a physical key press.
    ///
    /// Returns the position of the key that was pressed, or `None` if the
    /// physical key is not on the displayed layout.
    pub fn press_physical(&mut self, key: PhysicalKey) -> Option<(Position, KeyEffect)> {
        let (position, label) = self.label_for_physical(key)?;
        let label = label.clone();
        Some((position, self.press(&label)))
    }

    /// Displayed key a physical key stands for, without pressing it.
    #[must_use]
    pub fn label_for_physical(&self, key: PhysicalKey) -> Option<(Position, &KeyLabel)> {
        PhysicalKeyMap::lookup(self.current_layout(), self.state.shift, key)
    }

    /// Changes the active layout.
    ///
    /// The output and the shift/caps flags are left as they are. Unknown
    /// names are rejected and the current layout stays active.
    pub fn switch_layout(&mut self, name: &str) -> Result<()> {
        if !self.layouts.contains(name) {
            let known: Vec<_> = self.layouts.names().collect();
            anyhow::bail!(
                "Unknown layout '{}'. Available layouts: {}",
                name,
                known.join(", ")
            );
        }

        if self.state.current_layout != name {
            tracing::debug!(from = %self.state.current_layout, to = name, "switching layout");
            self.state.current_layout = name.to_string();
        }
        Ok(())
    }

    /// Switches to the next layout in declaration order and returns its name.
    pub fn cycle_layout(&mut self) -> &str {
        let next = self.layouts.next_after(&self.state.current_layout).to_string();
        tracing::debug!(to = %next, "cycling layout");
        self.state.current_layout = next;
        &self.state.current_layout
    }

    fn play_sound(&mut self) {
        if let Err(err) = self.sound.play() {
            tracing::debug!("key sound not played: {err:#}");
        }
    }
}

impl VirtualKeyboard<TextBuffer> {
    /// Keyboard over the built-in layouts writing into a fresh buffer, silent.
    pub fn with_builtin_layouts() -> Result<Self> {
        Ok(Self::new(
            LayoutSet::builtin()?,
            TextBuffer::new(),
            Box::new(Silent),
        ))
    }

    /// Text typed so far.
    #[must_use]
    pub fn text(&self) -> &str {
        self.output.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn keyboard() -> VirtualKeyboard {
        VirtualKeyboard::with_builtin_layouts().unwrap()
    }

    fn press(kb: &mut VirtualKeyboard, text: &str) -> KeyEffect {
        kb.press(&KeyLabel::parse(text))
    }

    struct FailingSound {
        attempts: Rc<Cell<usize>>,
    }

    impl KeySound for FailingSound {
        fn play(&mut self) -> Result<()> {
            self.attempts.set(self.attempts.get() + 1);
            anyhow::bail!("audio not loaded yet")
        }
    }

    #[test]
    fn test_initial_state() {
        let kb = keyboard();
        assert_eq!(kb.state(), &InputState::new("standard"));
        assert_eq!(kb.text(), "");
    }

    #[test]
    fn test_scenario_from_empty_output() {
        let mut kb = keyboard();

        press(&mut kb, "a");
        assert_eq!(kb.text(), "a");

        press(&mut kb, "Shift");
        press(&mut kb, "a");
        assert_eq!(kb.text(), "aA");
        assert!(!kb.state().shift);

        press(&mut kb, "Caps");
        press(&mut kb, "a");
        assert_eq!(kb.text(), "aAA");

        kb.switch_layout("numpad").unwrap();
        assert_eq!(kb.text(), "aAA");

        press(&mut kb, "5");
        assert_eq!(kb.text(), "aAA5");
    }

    #[test]
    fn test_shift_is_one_shot() {
        let mut kb = keyboard();
        press(&mut kb, "Shift");
        assert!(kb.state().shift);

        press(&mut kb, "b");
        press(&mut kb, "b");
        assert_eq!(kb.text(), "Bb");
        assert!(!kb.state().shift);
    }

    #[test]
    fn test_shift_survives_space_and_enter() {
        let mut kb = keyboard();
        press(&mut kb, "Shift");
        press(&mut kb, "Space");
        press(&mut kb, "Enter");
        assert!(kb.state().shift);

        press(&mut kb, "x");
        assert_eq!(kb.text(), " \nX");
        assert!(!kb.state().shift);
    }

    #[test]
    fn test_caps_persists_and_toggles_back() {
        let mut kb = keyboard();
        press(&mut kb, "Caps");
        press(&mut kb, "q");
        press(&mut kb, "w");
        assert!(kb.state().caps);

        press(&mut kb, "Caps");
        assert!(!kb.state().caps);
        press(&mut kb, "e");
        assert_eq!(kb.text(), "QWe");
    }

    #[test]
    fn test_shift_with_caps_gives_lowercase() {
        let mut kb = keyboard();
        press(&mut kb, "Caps");
        press(&mut kb, "Shift");
        press(&mut kb, "z");
        assert_eq!(kb.text(), "z");
        assert!(!kb.state().shift);
        assert!(kb.state().caps);
    }

    #[test]
    fn test_backspace_on_empty_output() {
        let mut kb = keyboard();
        assert_eq!(press(&mut kb, "Backspace"), KeyEffect::DeleteLast);
        assert_eq!(kb.text(), "");

        press(&mut kb, "a");
        press(&mut kb, "Backspace");
        press(&mut kb, "Backspace");
        assert_eq!(kb.text(), "");
    }

    #[test]
    fn test_ctrl_and_alt_do_nothing() {
        let mut kb = keyboard();
        press(&mut kb, "Shift");
        assert_eq!(press(&mut kb, "Ctrl"), KeyEffect::Nothing);
        assert_eq!(press(&mut kb, "Alt"), KeyEffect::Nothing);
        assert_eq!(kb.text(), "");
        assert!(kb.state().shift);
    }

    #[test]
    fn test_rows_follow_shift() {
        let mut kb = keyboard();
        assert_eq!(kb.rows()[1][1], KeyLabel::printable("q"));
        press(&mut kb, "Shift");
        assert_eq!(kb.rows()[1][1], KeyLabel::printable("Q"));
    }

    #[test]
    fn test_press_at_uses_displayed_rows() {
        let mut kb = keyboard();
        press(&mut kb, "Shift");
        // Row 0, col 1 is '!' on the shift row-set
        assert_eq!(
            kb.press_at(Position::new(0, 1)),
            Some(KeyEffect::Insert("!".to_string()))
        );
        assert!(!kb.state().shift);
        assert_eq!(kb.press_at(Position::new(9, 9)), None);
        assert_eq!(kb.text(), "!");
    }

    #[test]
    fn test_press_physical() {
        let mut kb = keyboard();
        let (pos, effect) = kb.press_physical(PhysicalKey::Char('h')).unwrap();
        assert_eq!(pos, Position::new(2, 6));
        assert_eq!(effect, KeyEffect::Insert("h".to_string()));

        kb.switch_layout("numpad").unwrap();
        assert!(kb.press_physical(PhysicalKey::Char('h')).is_none());
        assert_eq!(kb.text(), "h");
    }

    #[test]
    fn test_label_for_physical_follows_shift() {
        let mut kb = keyboard();
        let (_, label) = kb.label_for_physical(PhysicalKey::Char('G')).unwrap();
        assert_eq!(label, &KeyLabel::printable("g"));

        press(&mut kb, "Shift");
        let (_, label) = kb.label_for_physical(PhysicalKey::Char('g')).unwrap();
        assert_eq!(label, &KeyLabel::printable("G"));
        assert!(kb.label_for_physical(PhysicalKey::Char('1')).is_none());
        assert_eq!(kb.text(), "");
    }

    #[test]
    fn test_switch_layout_unknown_keeps_state() {
        let mut kb = keyboard();
        press(&mut kb, "Caps");

        let err = kb.switch_layout("dvorak").unwrap_err().to_string();
        assert!(err.contains("dvorak"));
        assert!(err.contains("standard, numpad"));
        assert_eq!(kb.state().current_layout, "standard");
        assert!(kb.state().caps);
    }

    #[test]
    fn test_switch_layout_keeps_toggles() {
        let mut kb = keyboard();
        press(&mut kb, "Shift");
        kb.switch_layout("numpad").unwrap();
        assert!(kb.state().shift);

        // Numpad has no shift row-set, digits are unaffected by uppercasing
        press(&mut kb, "7");
        assert_eq!(kb.text(), "7");
        assert!(!kb.state().shift);
    }

    #[test]
    fn test_cycle_layout() {
        let mut kb = keyboard();
        assert_eq!(kb.cycle_layout(), "numpad");
        assert_eq!(kb.cycle_layout(), "standard");
    }

    #[test]
    fn test_failing_sound_does_not_affect_typing() {
        let attempts = Rc::new(Cell::new(0));
        let mut kb = VirtualKeyboard::new(
            LayoutSet::builtin().unwrap(),
            TextBuffer::new(),
            Box::new(FailingSound {
                attempts: Rc::clone(&attempts),
            }),
        );

        kb.press(&KeyLabel::parse("Shift"));
        kb.press(&KeyLabel::parse("o"));
        kb.press(&KeyLabel::parse("k"));

        assert_eq!(kb.output().as_str(), "Ok");
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn test_starts_on_first_layout_without_standard() {
        let set = LayoutSet::new(vec![Layout::from_text("pad", &[&["1", "2"]])]).unwrap();
        let kb = VirtualKeyboard::new(set, String::new(), Box::new(Silent));
        assert_eq!(kb.state().current_layout, "pad");
        assert_eq!(kb.current_layout().name, "pad");
    }
}
