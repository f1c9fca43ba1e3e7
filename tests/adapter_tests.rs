//! Adapter tests - palette slots driving the engine end to end

use garden_grid::adapter::PaletteAdapter;
use garden_grid::core::{GardenEntityFactory, GridState};
use garden_grid::types::{EntityId, GridConfig, GridPos, PatternKind, PixelPos};

const CELL: i32 = 2;

fn setup() -> (GridState, PaletteAdapter) {
    let state = GridState::new(GridConfig::new(12, 9, CELL));
    let palette = PaletteAdapter::new(Box::new(GardenEntityFactory));
    (state, palette)
}

fn pixel_at(cell: GridPos) -> PixelPos {
    PixelPos::new(cell.x * CELL, cell.y * CELL)
}

/// Pump pending grid notifications through the adapter, returning any
/// entity the commit policy planted.
fn pump(state: &mut GridState, palette: &mut PaletteAdapter) -> Option<EntityId> {
    let mut planted = None;
    for event in state.drain_events() {
        planted = planted.or(palette.handle_event(state, &event));
    }
    planted
}

#[test]
fn test_default_palette_covers_all_patterns() {
    let (_, palette) = setup();
    assert_eq!(palette.slots().len(), PatternKind::ALL.len());
    assert_eq!(palette.selected(), None);
}

#[test]
fn test_select_slot_enters_placement_mode() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 1);
    assert_eq!(palette.selected_kind(), Some(PatternKind::Square2x2));
    assert!(state.in_placement_mode());
    assert_eq!(
        state.preview_pattern().map(|p| p.name().to_string()),
        Some("Square 2x2".to_string())
    );
}

#[test]
fn test_reselecting_slot_toggles_off() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 2);
    palette.select_slot(&mut state, 2);
    assert_eq!(palette.selected(), None);
    assert!(!state.in_placement_mode());
}

#[test]
fn test_switching_slots_swaps_the_preview() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 2);
    state.pointer_move(pixel_at(GridPos::new(4, 4)));
    palette.select_slot(&mut state, 4);
    assert!(state.in_placement_mode());
    assert_eq!(palette.selected_kind(), Some(PatternKind::TShape));
    // The hover position survives the swap
    assert_eq!(state.preview_position(), Some(GridPos::new(4, 4)));
}

#[test]
fn test_click_plants_and_stays_in_placement_mode() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 0);
    state.pointer_down(pixel_at(GridPos::new(3, 3)));

    let planted = pump(&mut state, &mut palette);
    let id = planted.unwrap_or_else(|| panic!("click should plant an entity"));
    assert_eq!(state.occupant_at(GridPos::new(3, 3)), Some(id));
    assert!(state.in_placement_mode(), "mode persists for repeat planting");
    assert_eq!(palette.selected(), Some(0));

    // A second click in a free cell plants a second entity
    state.pointer_down(pixel_at(GridPos::new(5, 5)));
    let second = pump(&mut state, &mut palette);
    assert!(second.is_some());
    assert_ne!(second, planted);
    assert_eq!(state.placed_count(), 2);
}

#[test]
fn test_click_on_conflict_plants_nothing() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 0);
    state.pointer_down(pixel_at(GridPos::new(3, 3)));
    pump(&mut state, &mut palette);

    state.pointer_down(pixel_at(GridPos::new(3, 3)));
    assert_eq!(pump(&mut state, &mut palette), None);
    assert_eq!(state.placed_count(), 1);
}

#[test]
fn test_rotate_applies_to_the_active_preview() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 2);
    state.pointer_move(pixel_at(GridPos::new(2, 2)));
    palette.rotate(&mut state);
    assert_eq!(
        state.preview_pattern().map(|p| p.cells().to_vec()),
        Some(vec![(0, 0), (0, 1), (0, 2)])
    );
}

#[test]
fn test_cancel_with_active_slot_deselects_first() {
    let (mut state, mut palette) = setup();
    palette.select_slot(&mut state, 3);
    palette.cancel(&mut state);
    assert_eq!(palette.selected(), None);
    assert!(!state.in_placement_mode());
}

#[test]
fn test_clicks_without_selection_do_not_plant() {
    let (mut state, mut palette) = setup();
    state.pointer_down(pixel_at(GridPos::new(2, 2)));
    state.pointer_up(pixel_at(GridPos::new(2, 2)));
    assert_eq!(pump(&mut state, &mut palette), None);
    assert_eq!(state.placed_count(), 0);
}
