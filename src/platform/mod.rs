//! Platform abstraction layer
//!
//! Browser-facing helpers that don't need `web-sys` themselves:
//! - Input buffering and key mapping
//! - Frame timing
//! - HUD class toggling

pub mod classes;
pub mod clock;
pub mod input;

pub use classes::with_class;
pub use clock::FrameClock;
pub use input::{InputState, KeyAction, key_action};
