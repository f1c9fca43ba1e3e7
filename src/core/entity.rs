//! Entity module - the placement capability contract
//!
//! Anything that participates in grid placement implements
//! [`PlacementTarget`]. The capability is attached at construction time;
//! there is no runtime component scanning.

use arrayvec::ArrayVec;

use crate::core::pattern::Pattern;
use crate::types::{GridPos, PixelPos, RotationState, MAX_PATTERN_CELLS};

/// Capability contract for placeable entities.
///
/// Position bookkeeping is pure: `set_grid_position` does not check
/// occupancy. The grid engine owns all occupancy decisions.
pub trait PlacementTarget: std::fmt::Debug {
    fn name(&self) -> &str;

    fn pattern(&self) -> &Pattern;
    fn set_pattern(&mut self, pattern: Pattern);

    /// Current grid position, None while never placed
    fn grid_position(&self) -> Option<GridPos>;
    fn set_grid_position(&mut self, pos: GridPos);

    /// Visual orientation counter, kept in lockstep with pattern rotation
    fn rotation(&self) -> RotationState;
    fn set_rotation(&mut self, rotation: RotationState);

    /// Whether user interaction may pick this entity up
    fn can_be_dragged(&self) -> bool;

    /// Cells this entity occupies at its current position
    fn occupied_cells(&self) -> ArrayVec<GridPos, MAX_PATTERN_CELLS> {
        match self.grid_position() {
            Some(pos) => self.pattern().absolute_cells(pos),
            None => ArrayVec::new(),
        }
    }

    /// Hook to reposition an attached visual relative to the pattern
    /// center after a position or rotation change
    fn refresh_anchor(&mut self, _anchor: PixelPos) {}
}

/// Creates placeable instances for a given footprint. How the visual side
/// of an entity is built stays external to the grid engine.
pub trait EntityFactory {
    fn spawn(&self, pattern: &Pattern) -> Box<dyn PlacementTarget>;
}

/// Stock placeable entity used by the demo and tests
#[derive(Debug, Clone)]
pub struct GardenEntity {
    name: String,
    pattern: Pattern,
    position: Option<GridPos>,
    rotation: RotationState,
    draggable: bool,
    anchor: PixelPos,
}

impl GardenEntity {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
            position: None,
            rotation: RotationState::R0,
            draggable: true,
            anchor: PixelPos::new(0, 0),
        }
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Last anchor pushed through the visual hook
    pub fn anchor(&self) -> PixelPos {
        self.anchor
    }
}

impl PlacementTarget for GardenEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
    }

    fn grid_position(&self) -> Option<GridPos> {
        self.position
    }

    fn set_grid_position(&mut self, pos: GridPos) {
        self.position = Some(pos);
    }

    fn rotation(&self) -> RotationState {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    fn can_be_dragged(&self) -> bool {
        self.draggable
    }

    fn refresh_anchor(&mut self, anchor: PixelPos) {
        self.anchor = anchor;
    }
}

/// Factory producing [`GardenEntity`] instances named after their pattern
#[derive(Debug, Clone, Default)]
pub struct GardenEntityFactory;

impl EntityFactory for GardenEntityFactory {
    fn spawn(&self, pattern: &Pattern) -> Box<dyn PlacementTarget> {
        Box::new(GardenEntity::new(pattern.name().to_string(), pattern.clone()))
    }
}
