//! GridView: maps the grid state into text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GridState, PreviewTint};
use crate::types::GridPos;

/// Glyphs keyed to preview validity - the two distinguishable visual
/// states the placeholder contract requires.
const GLYPH_VALID: char = 'o';
const GLYPH_INVALID: char = 'x';
const GLYPH_EMPTY: char = '.';

/// Board origin inside the rendered frame (border is one row/column)
pub const BOARD_ORIGIN: (u16, u16) = (1, 1);

/// A lightweight text renderer for the placement grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridView;

impl GridView {
    /// Render the grid plus a status line into text rows. Each cell is
    /// `cell_size` columns wide and one row tall.
    pub fn render(&self, state: &GridState, status: &str) -> Vec<String> {
        let (width, height) = state.grid_bounds();
        let cell_w = state.config().cell_size.max(1) as usize;

        let mut glyphs = vec![vec![GLYPH_EMPTY; width as usize]; height as usize];

        // Locked occupancy: entities render as their name initial.
        for (cell, id) in state.board().occupied_cells() {
            let glyph = state
                .entity(id)
                .and_then(|entity| entity.name().chars().next())
                .unwrap_or('#');
            glyphs[cell.y as usize][cell.x as usize] = glyph;
        }

        // Active preview overlays occupancy.
        if let Some(cells) = self.preview_cells(state) {
            let glyph = if state.preview_valid() {
                GLYPH_VALID
            } else {
                GLYPH_INVALID
            };
            for cell in cells {
                if state.in_bounds(cell) {
                    glyphs[cell.y as usize][cell.x as usize] = glyph;
                }
            }
        }

        let horizontal = "-".repeat(width as usize * cell_w);
        let mut lines = Vec::with_capacity(height as usize + 3);
        lines.push(format!("+{}+", horizontal));
        for row in glyphs {
            let mut line = String::from("|");
            for glyph in row {
                for _ in 0..cell_w {
                    line.push(glyph);
                }
            }
            line.push('|');
            lines.push(line);
        }
        lines.push(format!("+{}+", horizontal));
        lines.push(status.to_string());
        lines
    }

    /// Cells the active preview would occupy, if a preview is showing
    fn preview_cells(&self, state: &GridState) -> Option<Vec<GridPos>> {
        if state.is_dragging() {
            let base = state.preview_position()?;
            let pattern = state.preview_pattern()?;
            return Some(pattern.absolute_cells(base).to_vec());
        }
        // Placement placeholder is invisible until its first hover
        match state.preview_tint() {
            Some(PreviewTint::Neutral) | Some(PreviewTint::Warning) => {
                let base = state.preview_position()?;
                let pattern = state.preview_pattern()?;
                Some(pattern.absolute_cells(base).to_vec())
            }
            None => None,
        }
    }

    /// One-line summary for the status row
    pub fn status_line(&self, state: &GridState, selection: Option<&str>) -> String {
        let mode = if state.is_dragging() {
            "drag"
        } else if state.in_placement_mode() {
            "place"
        } else {
            "idle"
        };
        format!(
            "plants: {}  cells: {}  mode: {}  selection: {}",
            state.placed_count(),
            state.board().occupied_count(),
            mode,
            selection.unwrap_or("-"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GardenEntity, GardenEntityFactory, Pattern};
    use crate::types::{GridConfig, PatternKind, PixelPos};

    fn engine() -> GridState {
        GridState::new(GridConfig::new(4, 3, 2))
    }

    #[test]
    fn test_render_empty_grid() {
        let state = engine();
        let view = GridView;
        let lines = view.render(&state, "status");
        assert_eq!(lines.len(), 3 + 3); // border + rows + border + status
        assert_eq!(lines[0], "+--------+");
        assert_eq!(lines[1], "|........|");
        assert_eq!(lines.last().unwrap(), "status");
    }

    #[test]
    fn test_render_entity_initial() {
        let mut state = engine();
        let id = state.add_entity(Box::new(GardenEntity::new(
            "Shrub",
            Pattern::of(PatternKind::Single),
        )));
        state.place_entity(id, crate::types::GridPos::new(1, 1));

        let view = GridView;
        let lines = view.render(&state, "");
        assert_eq!(lines[2], "|..SS....|");
    }

    #[test]
    fn test_render_placement_preview_tints() {
        let mut state = engine();
        let factory = GardenEntityFactory;
        state.enter_placement_mode(Pattern::of(PatternKind::Single), &factory);

        let view = GridView;
        // Invisible before the first hover
        let lines = view.render(&state, "");
        assert!(lines[1].chars().all(|c| c != GLYPH_VALID && c != GLYPH_INVALID));

        state.pointer_move(PixelPos::new(0, 0));
        let lines = view.render(&state, "");
        assert_eq!(lines[1], "|oo......|");
    }

    #[test]
    fn test_status_line() {
        let state = engine();
        let view = GridView;
        let status = view.status_line(&state, Some("Plus"));
        assert!(status.contains("mode: idle"));
        assert!(status.contains("selection: Plus"));
    }
}
