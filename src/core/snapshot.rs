//! Read-only debug snapshot of the full grid

use serde::Serialize;

use crate::core::grid_state::GridState;
use crate::types::EntityId;

/// One placed entity in the snapshot listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub name: String,
    /// Origin cell as [x, y]
    pub position: Option<[i32; 2]>,
    pub rotation_degrees: u16,
    pub cells: Vec<[i32; 2]>,
}

/// Full-grid debug snapshot: counts plus an ordered entity listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub entity_count: usize,
    pub occupied_cells: usize,
    pub entities: Vec<EntitySnapshot>,
    pub dragging: bool,
    pub placement_mode: bool,
}

impl GridSnapshot {
    /// Capture the current grid state. Listing order follows the
    /// placed-entity registry (insertion order).
    pub fn capture(state: &GridState) -> Self {
        let entities = state
            .placed_entities()
            .into_iter()
            .filter_map(|id| {
                state.entity(id).map(|entity| EntitySnapshot {
                    id: raw_id(id),
                    name: entity.name().to_string(),
                    position: entity.grid_position().map(|pos| [pos.x, pos.y]),
                    rotation_degrees: entity.rotation().degrees(),
                    cells: entity
                        .occupied_cells()
                        .iter()
                        .map(|cell| [cell.x, cell.y])
                        .collect(),
                })
            })
            .collect();

        let (width, height) = state.grid_bounds();
        Self {
            width,
            height,
            cell_size: state.config().cell_size,
            entity_count: state.placed_count(),
            occupied_cells: state.board().occupied_count(),
            entities,
            dragging: state.is_dragging(),
            placement_mode: state.in_placement_mode(),
        }
    }
}

fn raw_id(id: EntityId) -> u32 {
    id.0
}
