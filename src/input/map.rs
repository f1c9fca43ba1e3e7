//! Mapping from terminal events to grid actions.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::{GridAction, PixelPos};

/// Map keyboard input to grid actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GridAction> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GridAction::Rotate),
        KeyCode::Esc => Some(GridAction::Cancel),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GridAction::ClearGrid),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GridAction::DumpSnapshot),

        // Palette slots
        KeyCode::Char(ch @ '1'..='7') => {
            Some(GridAction::SelectSlot(ch as usize - '1' as usize))
        }

        _ => None,
    }
}

/// Map mouse input to pointer actions. Terminal columns and rows double as
/// pixel coordinates once the view origin is subtracted; negative values
/// are fine, the engine treats them as out of bounds.
pub fn handle_mouse_event(mouse: MouseEvent, origin_col: u16, origin_row: u16) -> Option<GridAction> {
    let pixel = PixelPos::new(
        mouse.column as i32 - origin_col as i32,
        mouse.row as i32 - origin_row as i32,
    );
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GridAction::PointerDown(pixel)),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(GridAction::PointerMove(pixel))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(GridAction::PointerUp(pixel)),
        MouseEventKind::Down(MouseButton::Right) => Some(GridAction::Cancel),
        _ => None,
    }
}

/// Check if key should quit the demo.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
