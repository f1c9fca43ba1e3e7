//! Placement command layer between adapter and core.
//!
//! Core predicates report plain booleans; this layer diagnoses failures
//! into a stable error taxonomy for adapter-facing commands.

use crate::core::{EntityFactory, GridState, Pattern};
use crate::types::{EntityId, GridPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    InvalidPattern,
    OutOfBounds,
    CellConflict,
    UnknownEntity,
    NotDraggable,
    NoActivePlacement,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::InvalidPattern => "invalid_pattern",
            PlaceError::OutOfBounds => "out_of_bounds",
            PlaceError::CellConflict => "cell_conflict",
            PlaceError::UnknownEntity => "unknown_entity",
            PlaceError::NotDraggable => "not_draggable",
            PlaceError::NoActivePlacement => "no_active_placement",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::InvalidPattern => "pattern is empty or unnamed",
            PlaceError::OutOfBounds => "pattern would leave the grid",
            PlaceError::CellConflict => "target cells are already occupied",
            PlaceError::UnknownEntity => "entity is not registered with the grid",
            PlaceError::NotDraggable => "entity does not allow dragging",
            PlaceError::NoActivePlacement => "no placement preview is active",
        }
    }
}

/// Failure-order diagnosis matching the validation predicate:
/// invalid pattern, then bounds, then conflicts.
fn diagnose(
    state: &GridState,
    pattern: &Pattern,
    base: GridPos,
    exempt: Option<EntityId>,
) -> Result<(), PlaceError> {
    if !pattern.is_valid() {
        return Err(PlaceError::InvalidPattern);
    }
    for cell in pattern.absolute_cells(base) {
        if !state.in_bounds(cell) {
            return Err(PlaceError::OutOfBounds);
        }
    }
    for cell in pattern.absolute_cells(base) {
        if let Some(occupant) = state.occupant_at(cell) {
            if Some(occupant) != exempt {
                return Err(PlaceError::CellConflict);
            }
        }
    }
    Ok(())
}

/// Explain why a pattern cannot go at `base` (Ok when it can)
pub fn diagnose_placement(
    state: &GridState,
    pattern: &Pattern,
    base: GridPos,
) -> Result<(), PlaceError> {
    diagnose(state, pattern, base, None)
}

/// Whether a pointer grab on this entity would start a drag. Used for
/// cursor affordance: the engine itself just ignores the grab.
pub fn diagnose_drag(state: &GridState, id: EntityId) -> Result<(), PlaceError> {
    let Some(entity) = state.entity(id) else {
        return Err(PlaceError::UnknownEntity);
    };
    if !entity.can_be_dragged() {
        return Err(PlaceError::NotDraggable);
    }
    Ok(())
}

/// Place or move a registered entity, with diagnosis on failure
pub fn apply_place(state: &mut GridState, id: EntityId, cell: GridPos) -> Result<(), PlaceError> {
    let Some(entity) = state.entity(id) else {
        return Err(PlaceError::UnknownEntity);
    };
    let pattern = entity.pattern().clone();
    diagnose(state, &pattern, cell, Some(id))?;
    // Diagnosis mirrors the core validator, so the commit cannot fail here
    state.place_entity(id, cell);
    Ok(())
}

/// Instantiate a fresh entity from the factory and place it. The entity is
/// discarded again if validation fails, so the store never accumulates
/// unplaced entities.
pub fn apply_spawn(
    state: &mut GridState,
    factory: &dyn EntityFactory,
    pattern: &Pattern,
    cell: GridPos,
) -> Result<EntityId, PlaceError> {
    diagnose(state, pattern, cell, None)?;
    let id = state.add_entity(factory.spawn(pattern));
    if state.place_entity(id, cell) {
        Ok(id)
    } else {
        state.discard_unplaced(id);
        Err(PlaceError::CellConflict)
    }
}

/// Commit the active placement preview: spawn a real entity (not the
/// placeholder) at the validated preview position. Placement mode stays
/// active afterwards.
pub fn apply_commit(
    state: &mut GridState,
    factory: &dyn EntityFactory,
) -> Result<EntityId, PlaceError> {
    if !state.in_placement_mode() {
        return Err(PlaceError::NoActivePlacement);
    }
    let Some(position) = state.preview_position() else {
        return Err(PlaceError::NoActivePlacement);
    };
    let pattern = state
        .preview_pattern()
        .cloned()
        .ok_or(PlaceError::NoActivePlacement)?;
    apply_spawn(state, factory, &pattern, position)
}
