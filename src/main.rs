//! Terminal garden demo (default binary).
//!
//! Wires crossterm input into the grid engine and the palette adapter,
//! then renders the grid with the pure text view. Left-click drags placed
//! plants, digit keys pick a pattern slot, a click while a slot is active
//! plants a new entity.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use garden_grid::adapter::PaletteAdapter;
use garden_grid::core::{GardenEntityFactory, GridSnapshot, GridState};
use garden_grid::input::{handle_key_event, handle_mouse_event, should_quit, InputHandler};
use garden_grid::term::{GridView, TerminalRenderer, BOARD_ORIGIN};
use garden_grid::types::{GridAction, GridConfig, PixelPos};

fn main() -> Result<()> {
    env_logger::init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut state = GridState::new(GridConfig::default());
    let mut palette = PaletteAdapter::new(Box::new(GardenEntityFactory));
    let mut input = InputHandler::new();
    let view = GridView;

    loop {
        let status = view.status_line(
            &state,
            palette.selected_kind().map(|k| k.display_name()),
        );
        let mut lines = view.render(&state, &status);
        lines.push(palette_line(&palette));
        lines.push("q quit  r rotate  c clear  p snapshot  esc cancel".to_string());
        term.draw(&lines)?;

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => {
                handle_mouse_event(mouse, BOARD_ORIGIN.0, BOARD_ORIGIN.1)
                    .map(|action| scale_rows(action, state.config().cell_size))
            }
            _ => None,
        };

        let Some(action) = action else { continue };
        let Some(action) = input.process(action) else { continue };

        match action {
            GridAction::PointerDown(pixel) => state.pointer_down(pixel),
            GridAction::PointerMove(pixel) => state.pointer_move(pixel),
            GridAction::PointerUp(pixel) => state.pointer_up(pixel),
            GridAction::Rotate => palette.rotate(&mut state),
            GridAction::Cancel => palette.cancel(&mut state),
            GridAction::SelectSlot(index) => palette.select_slot(&mut state, index),
            GridAction::ClearGrid => state.clear_grid(),
            GridAction::DumpSnapshot => dump_snapshot(&state),
            GridAction::Quit => return Ok(()),
        }

        for grid_event in state.drain_events() {
            if let Some(id) = palette.handle_event(&mut state, &grid_event) {
                log::info!("planted entity {:?} via palette", id);
            }
        }
    }
}

/// The view draws one terminal row per grid row, so mouse rows arrive in
/// cell units while columns arrive in pixel units. Rescale rows to pixels.
fn scale_rows(action: GridAction, cell_size: i32) -> GridAction {
    let scale = |p: PixelPos| PixelPos::new(p.x, p.y * cell_size);
    match action {
        GridAction::PointerDown(p) => GridAction::PointerDown(scale(p)),
        GridAction::PointerMove(p) => GridAction::PointerMove(scale(p)),
        GridAction::PointerUp(p) => GridAction::PointerUp(scale(p)),
        other => other,
    }
}

fn palette_line(palette: &PaletteAdapter) -> String {
    let mut line = String::from("palette:");
    for (i, kind) in palette.slots().iter().enumerate() {
        let marker = if palette.selected() == Some(i) { "*" } else { "" };
        line.push_str(&format!(" {}:{}{}", i + 1, kind.display_name(), marker));
    }
    line
}

fn dump_snapshot(state: &GridState) {
    match serde_json::to_string_pretty(&GridSnapshot::capture(state)) {
        Ok(json) => log::info!("snapshot\n{}", json),
        Err(err) => log::warn!("snapshot serialization failed: {}", err),
    }
}
