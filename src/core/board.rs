//! Board module - the grid occupancy table
//!
//! Each in-bounds cell maps to at most one entity id. Uses flat row-major
//! storage for cache locality. Coordinates: (x, y) with x left to right and
//! y top to bottom, both starting at 0.

use crate::types::{EntityId, GridPos};

/// Contents of a single cell (None = empty)
pub type Cell = Option<EntityId>;

/// Runtime-sized occupancy table
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. Dimensions are clamped to at least 1x1.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.width || pos.y < 0 || pos.y >= self.height {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a position lies within grid bounds
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Get cell at position. Returns None if out of bounds.
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at position. Returns false if out of bounds.
    pub fn set(&mut self, pos: GridPos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Check if position is within bounds and occupied
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Occupant of a cell, flattened (out of bounds reads as empty)
    pub fn occupant(&self, pos: GridPos) -> Option<EntityId> {
        self.get(pos).flatten()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Iterate all occupied cells as (position, occupant)
    pub fn occupied_cells(&self) -> impl Iterator<Item = (GridPos, EntityId)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|id| {
                let idx = idx as i32;
                (GridPos::new(idx % self.width, idx / self.width), id)
            })
        })
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
