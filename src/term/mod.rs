//! Terminal presentation layer.

pub mod grid_view;
pub mod renderer;

pub use grid_view::{GridView, BOARD_ORIGIN};
pub use renderer::TerminalRenderer;
