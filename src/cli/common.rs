//! Shared CLI types: error kinds, exit codes and command context.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::LayoutSet;

/// Process exit codes of the headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input: unknown layout, invalid option value
    ValidationError = 1,
    /// File, config or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code for `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Bad input from the user
    Validation(String),
    /// Failure reading or writing files
    Io(String),
}

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) => ExitCode::ValidationError,
            Self::Io(_) => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) | Self::Io(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    /// Config file to use instead of the platform default
    pub config_path: Option<PathBuf>,
    /// Layouts file overriding the one named in the config
    pub layouts_file: Option<PathBuf>,
}

impl CliContext {
    /// Config file the commands read and write.
    pub fn config_path(&self) -> CliResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to locate config file: {e:#}"))),
        }
    }

    /// Loads the config, or defaults when the file does not exist.
    pub fn load_config(&self) -> CliResult<Config> {
        let path = self.config_path()?;
        Config::load_from(&path)
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
    }

    /// Built-in layouts merged with the layouts file, if any.
    pub fn load_layouts(&self, config: &Config) -> CliResult<LayoutSet> {
        let file: Option<&Path> = self
            .layouts_file
            .as_deref()
            .or(config.keyboard.layouts_file.as_deref());

        LayoutSet::builtin_with_file(file)
            .map_err(|e| CliError::io(format!("Failed to load layouts: {e:#}")))
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{text}");
    Ok(())
}
