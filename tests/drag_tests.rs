//! Drag tests - pointer sessions, the fallback chain and placement mode

use garden_grid::core::{GardenEntity, GardenEntityFactory, GridState, Pattern, PreviewTint};
use garden_grid::engine::apply_spawn;
use garden_grid::types::{EntityId, GridConfig, GridEvent, GridPos, PatternKind, PixelPos};

const CELL: i32 = 2;

fn engine() -> GridState {
    GridState::new(GridConfig::new(10, 8, CELL))
}

fn plant(state: &mut GridState, kind: PatternKind, cell: GridPos) -> EntityId {
    let id = apply_spawn(state, &GardenEntityFactory, &Pattern::of(kind), cell)
        .unwrap_or_else(|err| panic!("spawn failed: {}", err.message()));
    state.drain_events();
    id
}

fn pixel_at(cell: GridPos) -> PixelPos {
    PixelPos::new(cell.x * CELL, cell.y * CELL)
}

#[test]
fn test_drag_moves_entity_to_hovered_cell() {
    let mut state = engine();
    let id = plant(&mut state, PatternKind::Single, GridPos::new(2, 3));

    state.pointer_down(pixel_at(GridPos::new(2, 3)));
    assert!(state.is_dragging());
    assert_eq!(state.dragging_entity(), Some(id));
    // Lifted cells read as free while the drag is live
    assert!(!state.is_cell_occupied(GridPos::new(2, 3)));

    state.pointer_move(pixel_at(GridPos::new(6, 1)));
    assert_eq!(state.preview_position(), Some(GridPos::new(6, 1)));
    assert!(state.preview_valid());

    state.pointer_up(pixel_at(GridPos::new(6, 1)));
    assert!(!state.is_dragging());
    assert_eq!(state.occupant_at(GridPos::new(6, 1)), Some(id));

    let events = state.drain_events();
    assert!(events.contains(&GridEvent::EntityMoved {
        entity: id,
        from: GridPos::new(2, 3),
        to: GridPos::new(6, 1),
    }));
}

#[test]
fn test_drag_keeps_grab_offset() {
    let mut state = engine();
    let id = plant(&mut state, PatternKind::LineH3, GridPos::new(2, 2));

    // Grab the middle cell of the line
    state.pointer_down(pixel_at(GridPos::new(3, 2)));
    state.pointer_up(pixel_at(GridPos::new(6, 5)));

    // Base cell lands one left of the cursor, preserving the grab point
    assert_eq!(
        state.entity(id).unwrap().grid_position(),
        Some(GridPos::new(5, 5))
    );
}

#[test]
fn test_drop_on_conflict_restores_origin_silently() {
    let mut state = engine();
    plant(&mut state, PatternKind::Single, GridPos::new(1, 1));
    let id = plant(&mut state, PatternKind::Single, GridPos::new(2, 3));

    state.pointer_down(pixel_at(GridPos::new(2, 3)));
    state.pointer_move(pixel_at(GridPos::new(1, 1)));
    assert!(!state.preview_valid());
    state.pointer_up(pixel_at(GridPos::new(1, 1)));

    assert_eq!(state.occupant_at(GridPos::new(2, 3)), Some(id));
    // A restore to the exact origin is not an observable move
    let events = state.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, GridEvent::EntityMoved { .. })));
}

#[test]
fn test_drop_with_unusable_origin_removes_entity() {
    let mut state = engine();
    let blocker = plant(&mut state, PatternKind::Single, GridPos::new(1, 1));
    let id = plant(&mut state, PatternKind::Single, GridPos::new(2, 3));

    state.pointer_down(pixel_at(GridPos::new(2, 3)));
    // While the drag is live, a command-level move claims the origin cell
    assert!(garden_grid::engine::apply_place(&mut state, blocker, GridPos::new(2, 3)).is_ok());
    state.drain_events();

    // Release outside the grid: hovered cell invalid, origin now taken
    state.pointer_move(PixelPos::new(-10, -10));
    state.pointer_up(PixelPos::new(-10, -10));

    assert!(state.entity(id).is_none());
    let events = state.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GridEvent::EntityRemoved { entity, .. } if *entity == id
    )));
}

#[test]
fn test_release_outside_grid_restores_origin() {
    let mut state = engine();
    let id = plant(&mut state, PatternKind::LShape, GridPos::new(4, 4));

    state.pointer_down(pixel_at(GridPos::new(4, 4)));
    state.pointer_move(PixelPos::new(-30, -30));
    assert!(!state.preview_valid());
    state.pointer_up(PixelPos::new(-30, -30));

    assert_eq!(
        state.entity(id).unwrap().grid_position(),
        Some(GridPos::new(4, 4))
    );
    assert_eq!(state.board().occupied_count(), 3);
}

#[test]
fn test_non_draggable_entity_ignores_pointer() {
    let mut state = engine();
    let entity =
        GardenEntity::new("Statue", Pattern::of(PatternKind::Single)).with_draggable(false);
    let id = state.add_entity(Box::new(entity));
    assert!(state.place_entity(id, GridPos::new(3, 3)));
    state.drain_events();

    state.pointer_down(pixel_at(GridPos::new(3, 3)));
    assert!(!state.is_dragging());
    // The click itself is still observable
    assert_eq!(
        state.drain_events(),
        vec![GridEvent::CellClicked {
            cell: GridPos::new(3, 3),
            entity: Some(id),
        }]
    );
}

#[test]
fn test_rotate_during_drag_revalidates() {
    let mut state = engine();
    plant(&mut state, PatternKind::Single, GridPos::new(7, 1));
    let id = plant(&mut state, PatternKind::LineH3, GridPos::new(0, 0));

    state.pointer_down(pixel_at(GridPos::new(0, 0)));
    state.pointer_move(pixel_at(GridPos::new(7, 0)));
    // Horizontal line based at x=7 would need x=9; fits on width 10
    assert!(state.preview_valid());

    state.rotate_preview();
    // Now vertical, overlapping the blocker at (7,1)
    assert!(!state.preview_valid());
    assert_eq!(state.entity(id).unwrap().rotation().degrees(), 90);

    state.pointer_up(pixel_at(GridPos::new(7, 0)));
    // Fallback re-places the rotated line at the origin
    assert_eq!(
        state.entity(id).unwrap().grid_position(),
        Some(GridPos::new(0, 0))
    );
    assert_eq!(state.occupant_at(GridPos::new(0, 2)), Some(id));
}

#[test]
fn test_cancel_returns_dragged_entity_home() {
    let mut state = engine();
    let id = plant(&mut state, PatternKind::Square2x2, GridPos::new(2, 2));

    state.pointer_down(pixel_at(GridPos::new(2, 2)));
    state.pointer_move(pixel_at(GridPos::new(6, 6)));
    state.cancel();

    assert!(!state.is_dragging());
    assert_eq!(state.occupant_at(GridPos::new(2, 2)), Some(id));
    assert_eq!(state.board().occupied_count(), 4);
}

#[test]
fn test_placeholder_is_self_exempt() {
    let mut state = engine();
    let factory = GardenEntityFactory;
    state.enter_placement_mode(Pattern::of(PatternKind::Square2x2), &factory);

    state.pointer_move(pixel_at(GridPos::new(3, 3)));
    assert!(state.preview_valid());
    // Hover one cell over: overlaps the previous prospective footprint
    state.pointer_move(pixel_at(GridPos::new(4, 3)));
    assert!(state.preview_valid());
    assert_eq!(state.preview_tint(), Some(PreviewTint::Neutral));
    // The placeholder never writes the occupancy table
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_placement_preview_warns_on_conflict() {
    let mut state = engine();
    plant(&mut state, PatternKind::Square2x2, GridPos::new(4, 4));
    let factory = GardenEntityFactory;
    state.enter_placement_mode(Pattern::of(PatternKind::Single), &factory);

    assert_eq!(state.preview_tint(), None);
    state.pointer_move(pixel_at(GridPos::new(4, 4)));
    assert_eq!(state.preview_tint(), Some(PreviewTint::Warning));
    state.pointer_move(pixel_at(GridPos::new(0, 0)));
    assert_eq!(state.preview_tint(), Some(PreviewTint::Neutral));
}

#[test]
fn test_switching_preview_pattern_resets_rotation() {
    let mut state = engine();
    let factory = GardenEntityFactory;
    state.enter_placement_mode(Pattern::of(PatternKind::LineH3), &factory);
    state.pointer_move(pixel_at(GridPos::new(2, 2)));
    state.rotate_preview();
    assert_eq!(
        state.preview_pattern().map(|p| p.name().to_string()),
        Some("Line H3 (Rotated)".to_string())
    );

    state.update_preview_pattern(Pattern::of(PatternKind::TShape));
    assert!(state.in_placement_mode());
    assert_eq!(
        state.preview_pattern().map(|p| p.name().to_string()),
        Some("T Shape".to_string())
    );
    assert_eq!(state.placeholder().unwrap().rotation().degrees(), 0);
}

#[test]
fn test_cancel_exits_placement_mode() {
    let mut state = engine();
    let factory = GardenEntityFactory;
    state.enter_placement_mode(Pattern::of(PatternKind::Plus), &factory);
    state.pointer_move(pixel_at(GridPos::new(4, 4)));

    state.cancel();
    assert!(!state.in_placement_mode());
    assert_eq!(state.preview_tint(), None);
    assert_eq!(state.placed_count(), 0);
}

#[test]
fn test_entering_placement_mode_cancels_a_drag() {
    let mut state = engine();
    let id = plant(&mut state, PatternKind::Single, GridPos::new(2, 2));
    state.pointer_down(pixel_at(GridPos::new(2, 2)));
    assert!(state.is_dragging());

    let factory = GardenEntityFactory;
    state.enter_placement_mode(Pattern::of(PatternKind::Single), &factory);
    assert!(!state.is_dragging());
    assert!(state.in_placement_mode());
    // The dragged entity went back to its origin cell
    assert_eq!(state.occupant_at(GridPos::new(2, 2)), Some(id));
}
