//! Grid state module - occupancy, placement validation, and interaction
//!
//! This module ties together the occupancy board, the entity store, and the
//! two interaction pipelines: dragging a placed entity and previewing a new
//! one in placement mode. All mutations happen synchronously inside the
//! handler for a single input event or API call; the table is never left
//! disagreeing with an entity's recorded position across a handler.

use std::collections::{HashMap, VecDeque};

use crate::core::board::Board;
use crate::core::entity::{EntityFactory, PlacementTarget};
use crate::core::pattern::Pattern;
use crate::types::{EntityId, GridConfig, GridEvent, GridPos, PixelPos, RotationState};

/// Visual state of the placement placeholder, keyed to validity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTint {
    Neutral,
    Warning,
}

/// Live drag of a placed entity
#[derive(Debug, Clone, Copy)]
struct DragSession {
    entity: EntityId,
    /// Position recorded at drag start; restore target on a failed drop
    origin: Option<GridPos>,
    /// Cursor cell minus entity base cell at pickup
    grab_offset: (i32, i32),
    /// Candidate base position from the last in-bounds hover
    position: Option<GridPos>,
    valid: bool,
}

/// Live placement-mode preview for a new entity
#[derive(Debug)]
struct PlacementSession {
    pattern: Pattern,
    /// Transient visual stand-in. Never written to the occupancy table, so
    /// it is exempt from colliding with its own prospective cells.
    placeholder: Box<dyn PlacementTarget>,
    position: Option<GridPos>,
    valid: bool,
    /// Invisible until the first hover inside grid bounds
    visible: bool,
}

/// The grid engine: occupancy table, placed-entity registry, validation,
/// and the interaction state machine.
#[derive(Debug)]
pub struct GridState {
    config: GridConfig,
    board: Board,
    entities: HashMap<EntityId, Box<dyn PlacementTarget>>,
    /// Insertion-ordered registry of entities with cells on the table
    placed: Vec<EntityId>,
    next_id: u32,
    events: VecDeque<GridEvent>,
    drag: Option<DragSession>,
    placement: Option<PlacementSession>,
}

impl GridState {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            board: Board::new(config.width, config.height),
            entities: HashMap::new(),
            placed: Vec::new(),
            next_id: 0,
            events: VecDeque::new(),
            drag: None,
            placement: None,
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Grid extents as (width, height) in cells
    pub fn grid_bounds(&self) -> (i32, i32) {
        (self.board.width(), self.board.height())
    }

    pub fn in_bounds(&self, cell: GridPos) -> bool {
        self.board.in_bounds(cell)
    }

    /// Top-left pixel of a cell (purely linear)
    pub fn cell_to_pixel(&self, cell: GridPos) -> PixelPos {
        PixelPos::new(cell.x * self.config.cell_size, cell.y * self.config.cell_size)
    }

    /// Cell containing a pixel (floor division, componentwise)
    pub fn pixel_to_cell(&self, pixel: PixelPos) -> GridPos {
        GridPos::new(
            pixel.x.div_euclid(self.config.cell_size),
            pixel.y.div_euclid(self.config.cell_size),
        )
    }

    /// Pixel anchor of a pattern placed at `base`: center cell, mid-pixel
    fn anchor_pixel(&self, pattern: &Pattern, base: GridPos) -> PixelPos {
        let center = pattern.center();
        let pixel = self.cell_to_pixel(base.offset(center.x, center.y));
        PixelPos::new(
            pixel.x + self.config.cell_size / 2,
            pixel.y + self.config.cell_size / 2,
        )
    }

    // === Entity store & registry ===

    /// Register an entity with the engine without placing it
    pub fn add_entity(&mut self, entity: Box<dyn PlacementTarget>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entities.insert(id, entity);
        id
    }

    /// Drop an entity that never made it onto the table (failed spawn)
    pub fn discard_unplaced(&mut self, id: EntityId) -> bool {
        if self.placed.contains(&id) {
            return false;
        }
        self.entities.remove(&id).is_some()
    }

    pub fn entity(&self, id: EntityId) -> Option<&dyn PlacementTarget> {
        self.entities.get(&id).map(|e| e.as_ref())
    }

    /// Read-only copy of the placed-entity registry, in placement order
    pub fn placed_entities(&self) -> Vec<EntityId> {
        self.placed.clone()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    // === Validation & queries ===

    /// Check a pattern against bounds and occupancy, optionally exempting
    /// one entity (itself, when moving). No side effects.
    fn check_pattern_at(&self, pattern: &Pattern, base: GridPos, exempt: Option<EntityId>) -> bool {
        if !pattern.is_valid() {
            return false;
        }
        for cell in pattern.absolute_cells(base) {
            if !self.board.in_bounds(cell) {
                return false;
            }
            if let Some(occupant) = self.board.occupant(cell) {
                if Some(occupant) != exempt {
                    return false;
                }
            }
        }
        true
    }

    /// Pure placement predicate, safe to call repeatedly for hover
    /// feedback. The placement-mode placeholder never occupies table
    /// cells, so it cannot collide with its own prospective cells.
    pub fn can_place_pattern_at(&self, pattern: &Pattern, base: GridPos) -> bool {
        self.check_pattern_at(pattern, base, None)
    }

    pub fn is_cell_occupied(&self, cell: GridPos) -> bool {
        self.board.is_occupied(cell)
    }

    pub fn occupant_at(&self, cell: GridPos) -> Option<EntityId> {
        self.board.occupant(cell)
    }

    // === Mutations ===

    /// Place or move an entity so its pattern origin sits at `cell`.
    ///
    /// The single path through which the table and an entity's position
    /// mutate together: validate, clear the entity's old cells, write the
    /// new ones, update the target, register, notify. Returns false (and
    /// changes nothing) when validation fails.
    pub fn place_entity(&mut self, id: EntityId, cell: GridPos) -> bool {
        let Some(entity) = self.entities.get(&id) else {
            log::warn!("place_entity: unknown entity {:?}", id);
            return false;
        };
        let pattern = entity.pattern().clone();
        let old_pos = entity.grid_position();

        if !self.check_pattern_at(&pattern, cell, Some(id)) {
            log::warn!(
                "placement of {:?} ({}) rejected at ({}, {})",
                id,
                pattern.name(),
                cell.x,
                cell.y
            );
            return false;
        }

        self.clear_cells_of(id);
        for occupied in pattern.absolute_cells(cell) {
            self.board.set(occupied, Some(id));
        }

        let anchor = self.anchor_pixel(&pattern, cell);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_grid_position(cell);
            entity.refresh_anchor(anchor);
        }
        if !self.placed.contains(&id) {
            self.placed.push(id);
        }

        match old_pos {
            Some(from) if from != cell => {
                self.events.push_back(GridEvent::EntityMoved {
                    entity: id,
                    from,
                    to: cell,
                });
            }
            // Restored exactly where it was; nothing observable changed
            Some(_) => {}
            None => {
                self.events.push_back(GridEvent::EntityPlaced { entity: id, cell });
            }
        }
        true
    }

    /// Clear the entity's cells and drop it from the registry without a
    /// notification. Used when a drag picks an entity up; the entity stays
    /// in the store with its position intact.
    pub fn lift_entity_cells(&mut self, id: EntityId) {
        self.clear_cells_of(id);
        self.placed.retain(|&placed| placed != id);
    }

    /// Remove an entity completely: cells, registry, store. Emits
    /// `EntityRemoved`. Distinct from lifting - a drag pickup must not
    /// fire a removal notification.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(&id) {
            return false;
        }
        self.clear_cells_of(id);
        self.placed.retain(|&placed| placed != id);
        let entity = self.entities.remove(&id);
        let last_cell = entity
            .and_then(|e| e.grid_position())
            .unwrap_or(GridPos::new(0, 0));
        if self.drag.map(|d| d.entity) == Some(id) {
            self.drag = None;
        }
        self.events.push_back(GridEvent::EntityRemoved {
            entity: id,
            last_cell,
        });
        true
    }

    /// Clear all table cells pointing at the entity
    fn clear_cells_of(&mut self, id: EntityId) {
        let cells: Vec<GridPos> = self
            .board
            .occupied_cells()
            .filter(|&(_, occupant)| occupant == id)
            .map(|(cell, _)| cell)
            .collect();
        for cell in cells {
            self.board.set(cell, None);
        }
    }

    /// Reset the whole grid: reallocated table, empty store and registry,
    /// abandoned interaction sessions.
    pub fn clear_grid(&mut self) {
        self.board = Board::new(self.config.width, self.config.height);
        self.entities.clear();
        self.placed.clear();
        self.drag = None;
        self.placement = None;
        log::info!("grid cleared");
    }

    /// Take all pending notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        self.events.drain(..).collect()
    }

    // === Drag interaction ===

    /// Pointer button pressed at a pixel position.
    ///
    /// Emits `CellClicked` for any in-bounds cell. Over a drag-enabled
    /// occupant (and outside placement mode) this lifts the entity and
    /// starts a drag, so the cell beneath the cursor reads as free.
    pub fn pointer_down(&mut self, pixel: PixelPos) {
        let cell = self.pixel_to_cell(pixel);
        if !self.in_bounds(cell) {
            return;
        }
        let occupant = self.board.occupant(cell);

        // Placement mode and dragging are mutually exclusive; commits in
        // placement mode are adapter-driven, so a click only refreshes the
        // preview before notifying.
        if self.placement.is_some() {
            self.update_placement_preview(cell);
            self.events.push_back(GridEvent::CellClicked {
                cell,
                entity: occupant,
            });
            return;
        }
        self.events.push_back(GridEvent::CellClicked {
            cell,
            entity: occupant,
        });
        if self.drag.is_some() {
            return;
        }
        let Some(id) = occupant else {
            return;
        };
        let draggable = self
            .entities
            .get(&id)
            .map(|e| e.can_be_dragged())
            .unwrap_or(false);
        if !draggable {
            return;
        }
        self.start_drag(id, cell);
    }

    fn start_drag(&mut self, id: EntityId, cursor: GridPos) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        let origin = entity.grid_position();
        let base = origin.unwrap_or(cursor);
        let grab_offset = (cursor.x - base.x, cursor.y - base.y);
        let pattern = entity.pattern().clone();

        self.lift_entity_cells(id);
        let valid = self.check_pattern_at(&pattern, base, None);
        self.drag = Some(DragSession {
            entity: id,
            origin,
            grab_offset,
            position: Some(base),
            valid,
        });
        log::debug!("drag started for {:?} ({})", id, pattern.name());
    }

    /// Pointer moved. Updates whichever preview session is active.
    pub fn pointer_move(&mut self, pixel: PixelPos) {
        let cell = self.pixel_to_cell(pixel);
        if self.drag.is_some() {
            self.update_drag_preview(cell);
        } else if self.placement.is_some() {
            self.update_placement_preview(cell);
        }
    }

    fn update_drag_preview(&mut self, cursor: GridPos) {
        let Some(drag) = self.drag else {
            return;
        };
        if !self.in_bounds(cursor) {
            // Outside bounds: invalid, position not updated
            if let Some(drag) = self.drag.as_mut() {
                drag.valid = false;
            }
            return;
        }
        let base = GridPos::new(cursor.x - drag.grab_offset.0, cursor.y - drag.grab_offset.1);
        let pattern = match self.entities.get(&drag.entity) {
            Some(entity) => entity.pattern().clone(),
            None => Pattern::degenerate(),
        };
        let valid = self.check_pattern_at(&pattern, base, None);
        if let Some(drag) = self.drag.as_mut() {
            drag.position = Some(base);
            drag.valid = valid;
        }
    }

    /// Pointer button released: resolve the drag.
    ///
    /// Fallback chain: hovered position if valid, else the position
    /// recorded at drag start, else complete removal.
    pub fn pointer_up(&mut self, pixel: PixelPos) {
        if self.drag.is_some() {
            self.pointer_move(pixel);
        }
        let Some(drag) = self.drag.take() else {
            return;
        };
        let id = drag.entity;
        if drag.valid {
            if let Some(target) = drag.position {
                if self.place_entity(id, target) {
                    return;
                }
            }
        }
        if let Some(origin) = drag.origin {
            if self.place_entity(id, origin) {
                return;
            }
        }
        log::warn!("drag of {:?} found no legal destination; removing", id);
        self.remove_entity(id);
    }

    /// Rotate whichever preview is active (dragged entity or placement
    /// pattern). No-op for non-rotatable patterns.
    pub fn rotate_preview(&mut self) {
        if let Some(drag) = self.drag {
            self.rotate_dragged(drag.entity);
        } else if self.placement.is_some() {
            self.rotate_placement_pattern();
        }
    }

    fn rotate_dragged(&mut self, id: EntityId) {
        let rotated = {
            let Some(entity) = self.entities.get_mut(&id) else {
                return;
            };
            if !entity.pattern().can_rotate() {
                return;
            }
            let rotated = entity.pattern().rotate_clockwise();
            entity.set_pattern(rotated.clone());
            // Keep the orientation counter in lockstep with the geometry
            let next = entity.rotation().rotate_cw();
            entity.set_rotation(next);
            rotated
        };
        let revalidated = self
            .drag
            .and_then(|d| d.position)
            .map(|base| self.check_pattern_at(&rotated, base, None));
        if let (Some(drag), Some(valid)) = (self.drag.as_mut(), revalidated) {
            drag.valid = valid;
        }
    }

    /// Abandon the active interaction, leaving the table consistent: a
    /// dragged entity returns to its origin (or is removed), a placement
    /// session drops its placeholder.
    pub fn cancel(&mut self) {
        if let Some(drag) = self.drag.take() {
            let id = drag.entity;
            if let Some(origin) = drag.origin {
                if self.place_entity(id, origin) {
                    return;
                }
            }
            self.remove_entity(id);
        } else if self.placement.is_some() {
            self.exit_placement_mode();
        }
    }

    // === Placement mode (new-entity preview) ===

    /// Enter placement mode with a pattern; the factory instantiates the
    /// transient placeholder once. Entering while already in placement
    /// mode switches the pattern in place. A live drag is cancelled first.
    pub fn enter_placement_mode(&mut self, pattern: Pattern, factory: &dyn EntityFactory) {
        if self.drag.is_some() {
            self.cancel();
        }
        if self.placement.is_some() {
            self.update_preview_pattern(pattern);
            return;
        }
        let placeholder = factory.spawn(&pattern);
        log::debug!("placement mode entered with {}", pattern.name());
        self.placement = Some(PlacementSession {
            pattern,
            placeholder,
            position: None,
            valid: false,
            visible: false,
        });
    }

    /// Exit placement mode, destroying the placeholder and resetting
    /// preview state
    pub fn exit_placement_mode(&mut self) {
        if self.placement.take().is_some() {
            log::debug!("placement mode exited");
        }
    }

    /// Switch the active pattern without recreating the placeholder,
    /// re-deriving position-dependent state from the new footprint
    pub fn update_preview_pattern(&mut self, pattern: Pattern) {
        if self.placement.is_none() {
            return;
        }
        let position = self.placement.as_ref().and_then(|s| s.position);
        let valid = position
            .map(|cell| self.check_pattern_at(&pattern, cell, None))
            .unwrap_or(false);
        let anchor = position.map(|cell| self.anchor_pixel(&pattern, cell));
        if let Some(session) = self.placement.as_mut() {
            session.placeholder.set_pattern(pattern.clone());
            session.placeholder.set_rotation(RotationState::R0);
            if let Some(cell) = position {
                session.placeholder.set_grid_position(cell);
            }
            if let Some(anchor) = anchor {
                session.placeholder.refresh_anchor(anchor);
            }
            session.pattern = pattern;
            session.valid = valid;
        }
    }

    fn update_placement_preview(&mut self, cell: GridPos) {
        if !self.in_bounds(cell) {
            if let Some(session) = self.placement.as_mut() {
                session.valid = false;
            }
            return;
        }
        let pattern = match self.placement.as_ref() {
            Some(session) => session.pattern.clone(),
            None => return,
        };
        let valid = self.check_pattern_at(&pattern, cell, None);
        let anchor = self.anchor_pixel(&pattern, cell);
        if let Some(session) = self.placement.as_mut() {
            session.position = Some(cell);
            session.valid = valid;
            session.visible = true;
            session.placeholder.set_grid_position(cell);
            session.placeholder.refresh_anchor(anchor);
        }
    }

    fn rotate_placement_pattern(&mut self) {
        let Some(session) = self.placement.as_ref() else {
            return;
        };
        if !session.pattern.can_rotate() {
            return;
        }
        let rotated = session.pattern.rotate_clockwise();
        let position = session.position;
        let valid = position
            .map(|cell| self.check_pattern_at(&rotated, cell, None))
            .unwrap_or(false);
        let anchor = position.map(|cell| self.anchor_pixel(&rotated, cell));
        if let Some(session) = self.placement.as_mut() {
            session.placeholder.set_pattern(rotated.clone());
            let next = session.placeholder.rotation().rotate_cw();
            session.placeholder.set_rotation(next);
            if let Some(anchor) = anchor {
                session.placeholder.refresh_anchor(anchor);
            }
            session.pattern = rotated;
            session.valid = valid;
        }
    }

    // === Interaction state queries ===

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragging_entity(&self) -> Option<EntityId> {
        self.drag.map(|d| d.entity)
    }

    pub fn in_placement_mode(&self) -> bool {
        self.placement.is_some()
    }

    /// Pattern driving the active preview (drag or placement)
    pub fn preview_pattern(&self) -> Option<&Pattern> {
        if let Some(drag) = &self.drag {
            return self.entities.get(&drag.entity).map(|e| e.pattern());
        }
        self.placement.as_ref().map(|s| &s.pattern)
    }

    pub fn preview_position(&self) -> Option<GridPos> {
        if let Some(drag) = &self.drag {
            return drag.position;
        }
        self.placement.as_ref().and_then(|s| s.position)
    }

    pub fn preview_valid(&self) -> bool {
        if let Some(drag) = &self.drag {
            return drag.valid;
        }
        self.placement.as_ref().map(|s| s.valid).unwrap_or(false)
    }

    /// Placeholder tint, present once the placement preview is visible
    pub fn preview_tint(&self) -> Option<PreviewTint> {
        let session = self.placement.as_ref()?;
        if !session.visible {
            return None;
        }
        Some(if session.valid {
            PreviewTint::Neutral
        } else {
            PreviewTint::Warning
        })
    }

    pub fn placeholder(&self) -> Option<&dyn PlacementTarget> {
        self.placement.as_ref().map(|s| s.placeholder.as_ref())
    }
}
