//! Garden Grid: a tile-based placement engine.
//!
//! `core` holds the occupancy board, patterns and the stateful grid engine,
//! `engine` the placement command layer, `input` the terminal event mapping,
//! `adapter` the palette glue and `term` the pure text view used by the demo
//! binary.

pub mod adapter;
pub mod core;
pub mod engine;
pub mod input;
pub mod term;
pub mod types;
