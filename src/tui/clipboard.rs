//! Copying the typed text to the system clipboard.

use anyhow::{Context, Result};

/// Destination of the copy shortcut.
pub trait TextClipboard {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Creates a handle without touching the OS clipboard yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: None }
    }
}

impl TextClipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Clipboard is not available")?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_string())
            .context("Failed to copy to clipboard")
    }
}

/// In-memory clipboard, used when no system clipboard should be touched.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    /// Last copied text
    pub contents: Option<String>,
}

impl TextClipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
