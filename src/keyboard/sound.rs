//! Audio cue played on every key press.

use anyhow::{Context, Result};
use std::io::{self, Write};

/// Plays a short cue for a key press.
///
/// Playback is fire-and-forget: the keyboard logs an error and carries on.
pub trait KeySound {
    /// Plays the cue once.
    fn play(&mut self) -> Result<()>;
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl KeySound for TerminalBell {
    fn play(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|()| stdout.flush())
            .context("Failed to ring terminal bell")
    }
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl KeySound for Silent {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Builds the cue for the sound setting.
#[must_use]
pub fn from_setting(enabled: bool) -> Box<dyn KeySound> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}
