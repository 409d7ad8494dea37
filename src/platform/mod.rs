//! Platform abstraction layer
//!
//! Maps browser input onto the simulation's `TickInput`.

pub mod input;

pub use input::{Key, apply_key};
