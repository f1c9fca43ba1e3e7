//! Palette adapter: translates "entity selected for placement" intents
//! into grid engine calls and owns the commit policy.

use crate::core::{EntityFactory, GridState, Pattern};
use crate::engine::place::{apply_commit, PlaceError};
use crate::types::{EntityId, GridEvent, PatternKind};

/// HUD-side palette of placeable footprints.
///
/// Selecting a slot enters placement mode; selecting another slot switches
/// the preview pattern in place; re-selecting the active slot deselects.
/// A click on the grid while a slot is selected commits a fresh entity at
/// the validated preview position - the core never auto-commits.
pub struct PaletteAdapter {
    slots: Vec<PatternKind>,
    selected: Option<usize>,
    factory: Box<dyn EntityFactory>,
}

impl PaletteAdapter {
    pub fn new(factory: Box<dyn EntityFactory>) -> Self {
        Self::with_slots(factory, PatternKind::ALL.to_vec())
    }

    pub fn with_slots(factory: Box<dyn EntityFactory>, slots: Vec<PatternKind>) -> Self {
        Self {
            slots,
            selected: None,
            factory,
        }
    }

    pub fn slots(&self) -> &[PatternKind] {
        &self.slots
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_kind(&self) -> Option<PatternKind> {
        self.selected.map(|index| self.slots[index])
    }

    /// Toggle a palette slot
    pub fn select_slot(&mut self, state: &mut GridState, index: usize) {
        if index >= self.slots.len() {
            return;
        }
        if self.selected == Some(index) {
            self.deselect(state);
            return;
        }
        self.selected = Some(index);
        let pattern = Pattern::of(self.slots[index]);
        state.enter_placement_mode(pattern, self.factory.as_ref());
    }

    pub fn deselect(&mut self, state: &mut GridState) {
        self.selected = None;
        state.exit_placement_mode();
    }

    /// Rotate the active preview (placement placeholder or dragged entity)
    pub fn rotate(&self, state: &mut GridState) {
        state.rotate_preview();
    }

    /// Abandon the current interaction: deselect if a slot is active,
    /// otherwise let the engine resolve a live drag.
    pub fn cancel(&mut self, state: &mut GridState) {
        if self.selected.is_some() {
            self.deselect(state);
        } else {
            state.cancel();
        }
    }

    /// React to a grid notification. Returns the id of a newly planted
    /// entity when the commit policy fires.
    pub fn handle_event(
        &mut self,
        state: &mut GridState,
        event: &GridEvent,
    ) -> Option<EntityId> {
        match event {
            GridEvent::CellClicked { .. }
                if self.selected.is_some() && state.in_placement_mode() =>
            {
                if !state.preview_valid() {
                    return None;
                }
                match apply_commit(state, self.factory.as_ref()) {
                    Ok(id) => Some(id),
                    Err(err) => {
                        self.report(err);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn report(&self, err: PlaceError) {
        log::warn!("palette commit failed: {} ({})", err.message(), err.code());
    }
}
