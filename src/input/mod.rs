//! Keyboard input for manual driving

pub mod handler;

pub use handler::{DriveKey, InputHandler, KeyAction};
