//! Adapter module - HUD/palette boundary
//!
//! The adapter drives the grid engine through user intents (select,
//! rotate, commit, cancel) and consumes the notifications it emits. It is
//! the only layer with a commit policy; the core stays commit-agnostic.

pub mod palette;

pub use palette::PaletteAdapter;
