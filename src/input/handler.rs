//! Pointer input handler for terminal environments.
//!
//! Terminals report mouse motion once per character cell but can repeat
//! the same coordinate; the handler collapses duplicate motion and drops
//! stray button releases so the engine only sees coherent sequences.

use crate::types::{GridAction, PixelPos};

/// Tracks raw pointer state between events.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    last_motion: Option<PixelPos>,
    button_down: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter a mapped action. Returns None when the action carries no new
    /// information for the engine.
    pub fn process(&mut self, action: GridAction) -> Option<GridAction> {
        match action {
            GridAction::PointerMove(pixel) if self.last_motion == Some(pixel) => None,
            GridAction::PointerMove(pixel) => {
                self.last_motion = Some(pixel);
                Some(action)
            }
            GridAction::PointerDown(pixel) => {
                self.button_down = true;
                self.last_motion = Some(pixel);
                Some(action)
            }
            GridAction::PointerUp(_) if !self.button_down => None,
            GridAction::PointerUp(_) => {
                self.button_down = false;
                Some(action)
            }
            other => Some(other),
        }
    }

    pub fn button_down(&self) -> bool {
        self.button_down
    }
}
