//! Service layer for keyboard logic.
//!
//! Services hold the rules that sit between the data models and the
//! controller: resolving rows and key effects, and mapping physical keys.

pub mod physical_keys;
pub mod resolver;

pub use physical_keys::{PhysicalKey, PhysicalKeyMap};
pub use resolver::KeyLayoutResolver;
