//! Softkeys library
//!
//! An on-screen keyboard for the terminal: key layouts with shift and caps
//! handling, a controller that turns key activations into text, a Ratatui
//! front end and headless CLI commands.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod keyboard;
pub mod logging;
pub mod models;
pub mod services;
pub mod shortcuts;
pub mod tui;
