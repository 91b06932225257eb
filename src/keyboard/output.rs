//! Output targets for produced characters.

/// Receives the characters the keyboard produces.
///
/// The keyboard only appends and truncates; it never reads the content
/// back to make decisions.
pub trait OutputSink {
    /// Appends text at the end.
    fn append(&mut self, text: &str);

    /// Removes the last character. Does nothing when empty.
    fn truncate_last(&mut self);
}

/// In-memory text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Current content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters (not bytes).
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Consumes the buffer and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl OutputSink for TextBuffer {
    fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn truncate_last(&mut self) {
        self.text.pop();
    }
}

impl OutputSink for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }

    fn truncate_last(&mut self) {
        self.pop();
    }
}
