//! Input handler modules for the keyboard screen.

pub mod actions;
pub mod main;
pub mod mouse;

// Re-export handler functions
pub use actions::dispatch_action;
pub use main::handle_key_input;
pub use mouse::handle_mouse_input;
