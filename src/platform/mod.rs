//! Platform abstraction layer
//!
//! Handles the edges of the game that are not simulation:
//! - Input events (key codes to logical actions)

pub mod input;

pub use input::{Bindings, InputState, Key};
