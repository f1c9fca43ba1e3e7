//! Engine module - adapter-facing command application

pub mod place;

pub use place::{
    apply_commit, apply_place, apply_spawn, diagnose_drag, diagnose_placement, PlaceError,
};
