//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and file locations.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Softkeys";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "softkeys";

/// Directory name under the platform config directory.
pub const APP_CONFIG_DIR: &str = "softkeys";

/// Log file written while the terminal UI owns stdout.
pub const LOG_FILE_NAME: &str = "softkeys.log";
