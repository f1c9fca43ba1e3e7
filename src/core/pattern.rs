//! Pattern module - polyomino footprint shapes
//!
//! A pattern is an immutable set of relative cell offsets, normalized so the
//! minimum x and y are both 0. Rotation produces a new pattern; holders of
//! the original never observe a change.

use arrayvec::ArrayVec;

use crate::types::{GridPos, PatternKind, MAX_PATTERN_CELLS};

/// Relative cell offset within a pattern
pub type CellOffset = (i8, i8);

/// Offset list - fixed capacity, insertion order preserved
pub type OffsetList = ArrayVec<CellOffset, MAX_PATTERN_CELLS>;

/// Suffix appended to a pattern name on its first rotation
const ROTATED_SUFFIX: &str = " (Rotated)";

/// Normalized polyomino footprint with a rotatability flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    cells: OffsetList,
    can_rotate: bool,
}

impl Pattern {
    /// Build a pattern from raw offsets, normalizing them
    pub fn from_offsets(name: impl Into<String>, offsets: &[CellOffset], can_rotate: bool) -> Self {
        let mut cells = OffsetList::new();
        for &offset in offsets.iter().take(MAX_PATTERN_CELLS) {
            cells.push(offset);
        }
        let mut pattern = Self {
            name: name.into(),
            cells,
            can_rotate,
        };
        pattern.normalize();
        pattern
    }

    /// Factory for the canonical shapes
    pub fn of(kind: PatternKind) -> Self {
        let (offsets, can_rotate): (&[CellOffset], bool) = match kind {
            PatternKind::Single => (&[(0, 0)], true),
            // Rotation is visually identity for the square, so it is fixed
            PatternKind::Square2x2 => (&[(0, 0), (1, 0), (0, 1), (1, 1)], false),
            PatternKind::LineH3 => (&[(0, 0), (1, 0), (2, 0)], true),
            PatternKind::LineV3 => (&[(0, 0), (0, 1), (0, 2)], true),
            PatternKind::TShape => (&[(1, 0), (0, 1), (1, 1), (2, 1)], true),
            PatternKind::LShape => (&[(0, 0), (0, 1), (1, 1)], true),
            // Same for the plus-cross
            PatternKind::Plus => (&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)], false),
        };
        Self::from_offsets(kind.display_name(), offsets, can_rotate)
    }

    /// Degenerate pattern with no cells. Never placeable; validation layers
    /// must treat it as invalid.
    pub fn degenerate() -> Self {
        Self {
            name: String::new(),
            cells: OffsetList::new(),
            can_rotate: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[CellOffset] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn can_rotate(&self) -> bool {
        self.can_rotate
    }

    /// True iff the pattern has cells and a non-empty name
    pub fn is_valid(&self) -> bool {
        !self.cells.is_empty() && !self.name.is_empty()
    }

    /// Shift offsets so the minimum x and y become 0
    fn normalize(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let min_x = self.cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = self.cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
        for cell in &mut self.cells {
            cell.0 -= min_x;
            cell.1 -= min_y;
        }
    }

    /// Rotate 90 degrees clockwise (y axis points down, screen space).
    ///
    /// Non-rotatable patterns return an identical value rather than an
    /// error. The result keeps rotatability and gains a single
    /// `" (Rotated)"` name suffix; repeated rotations keep the name stable.
    pub fn rotate_clockwise(&self) -> Self {
        if !self.can_rotate {
            return self.clone();
        }

        let mut cells = OffsetList::new();
        for &(x, y) in &self.cells {
            cells.push((y, -x));
        }

        let name = if self.name.ends_with(ROTATED_SUFFIX) {
            self.name.clone()
        } else {
            format!("{}{}", self.name, ROTATED_SUFFIX)
        };

        let mut rotated = Self {
            name,
            cells,
            can_rotate: true,
        };
        rotated.normalize();
        rotated
    }

    /// Bounding box as (origin, size). A degenerate pattern reports a 1x1
    /// box at the origin.
    pub fn bounding_box(&self) -> (GridPos, GridPos) {
        if self.cells.is_empty() {
            return (GridPos::new(0, 0), GridPos::new(1, 1));
        }
        let min_x = self.cells.iter().map(|&(x, _)| x as i32).min().unwrap_or(0);
        let max_x = self.cells.iter().map(|&(x, _)| x as i32).max().unwrap_or(0);
        let min_y = self.cells.iter().map(|&(_, y)| y as i32).min().unwrap_or(0);
        let max_y = self.cells.iter().map(|&(_, y)| y as i32).max().unwrap_or(0);
        (
            GridPos::new(min_x, min_y),
            GridPos::new(max_x - min_x + 1, max_y - min_y + 1),
        )
    }

    /// Center cell: bounding-box origin + floor(size / 2) per axis
    pub fn center(&self) -> GridPos {
        let (origin, size) = self.bounding_box();
        GridPos::new(origin.x + size.x / 2, origin.y + size.y / 2)
    }

    /// Cells occupied when the pattern's origin sits at `base`.
    /// Output order matches the stored offset order (not sorted).
    pub fn absolute_cells(&self, base: GridPos) -> ArrayVec<GridPos, MAX_PATTERN_CELLS> {
        self.cells
            .iter()
            .map(|&(dx, dy)| base.offset(dx as i32, dy as i32))
            .collect()
    }

    /// Cells occupied when the pattern's center sits on `center`
    pub fn centered_cells(&self, center: GridPos) -> ArrayVec<GridPos, MAX_PATTERN_CELLS> {
        let own = self.center();
        self.absolute_cells(GridPos::new(center.x - own.x, center.y - own.y))
    }
}
