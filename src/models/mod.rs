//! Data models for key layouts and keyboard input state.
//!
//! Models are independent of the terminal UI and of any output target.

pub mod input_state;
pub mod key;
pub mod layout;

pub use input_state::InputState;
pub use key::{ControlKey, KeyEffect, KeyLabel};
pub use layout::{KeyRow, Layout, LayoutSet, Position, DEFAULT_LAYOUT};
