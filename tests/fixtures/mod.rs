//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the softkeys binary
pub fn softkeys_bin() -> &'static str {
    env!("CARGO_BIN_EXE_softkeys")
}

/// Layouts file adding an `arrows` layout and replacing `numpad`.
pub const USER_LAYOUTS: &str = r#"
[[layouts]]
name = "arrows"
title = "Arrows"
default = [
    ['h', 'j', 'k', 'l'],
    ['Space', 'Enter'],
]
shift = [
    ['H', 'J', 'K', 'L'],
    ['Space', 'Enter'],
]

[[layouts]]
name = "numpad"
title = "Small numpad"
default = [
    ['1', '2'],
    ['Backspace'],
]
"#;

/// Layouts file whose shift rows do not match the default rows.
pub const BROKEN_LAYOUTS: &str = r#"
[[layouts]]
name = "broken"
default = [['a', 'b']]
shift = [['A']]
"#;

/// Isolated config directory; every command gets `--config` pointing into it.
pub struct TestEnv {
    /// Keeps the directory alive
    pub dir: TempDir,
}

impl TestEnv {
    /// Creates an empty environment (no config file, defaults apply).
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Config file path inside the environment.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Writes a file into the environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Runs the binary with `args` against this environment's config.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(softkeys_bin())
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute command")
    }
}

/// Stdout of a command as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stdout parsed as JSON, with stderr in the panic message.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(output)).unwrap_or_else(|e| {
        panic!(
            "Should parse JSON ({e}). stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Asserts the exit code, showing stderr on failure.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Path as a `&str` for command arguments.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}
