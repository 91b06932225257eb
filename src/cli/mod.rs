//! CLI command handlers for Softkeys.
//!
//! Headless, scriptable access to the keyboard for automation and tests.

pub mod common;
pub mod config;
pub mod layouts;
pub mod show;
pub mod type_keys;

// Re-export types used by main.rs and tests
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use layouts::LayoutsArgs;
pub use show::ShowArgs;
pub use type_keys::TypeArgs;
