//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GridAction`]
//! values and provides a small handler that collapses redundant pointer
//! traffic before it reaches the grid engine.

pub mod handler;
pub mod map;

pub use handler::InputHandler;
pub use map::{handle_key_event, handle_mouse_event, should_quit};
