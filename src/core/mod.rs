//! Core module - pure placement logic with no I/O dependencies
//!
//! Contains the footprint geometry, the occupancy table, the placement
//! capability contract, and the grid engine with its interaction state.

pub mod board;
pub mod entity;
pub mod grid_state;
pub mod pattern;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use entity::{EntityFactory, GardenEntity, GardenEntityFactory, PlacementTarget};
pub use grid_state::{GridState, PreviewTint};
pub use pattern::Pattern;
pub use snapshot::{EntitySnapshot, GridSnapshot};
