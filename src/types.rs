//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Demo grid dimensions (cells)
pub const DEMO_GRID_WIDTH: i32 = 12;
pub const DEMO_GRID_HEIGHT: i32 = 9;

/// Demo cell size in pixels. The terminal demo renders one cell as two
/// columns, so terminal columns double as pixel coordinates.
pub const DEMO_CELL_SIZE: i32 = 2;

/// Upper bound on cells per pattern (largest canonical shape has 5)
pub const MAX_PATTERN_CELLS: usize = 8;

/// Integer cell coordinate inside the bounded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by a relative offset
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Pixel-space coordinate (abstract units, `cell_size` pixels per cell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Unique identifier for entities on the grid (monotonic per session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// The seven canonical footprint shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Single,
    Square2x2,
    LineH3,
    LineV3,
    TShape,
    LShape,
    Plus,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::Single,
        PatternKind::Square2x2,
        PatternKind::LineH3,
        PatternKind::LineV3,
        PatternKind::TShape,
        PatternKind::LShape,
        PatternKind::Plus,
    ];

    /// Parse pattern kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" => Some(PatternKind::Single),
            "square" | "square2x2" => Some(PatternKind::Square2x2),
            "lineh" | "lineh3" => Some(PatternKind::LineH3),
            "linev" | "linev3" => Some(PatternKind::LineV3),
            "t" | "tshape" => Some(PatternKind::TShape),
            "l" | "lshape" => Some(PatternKind::LShape),
            "plus" => Some(PatternKind::Plus),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Single => "single",
            PatternKind::Square2x2 => "square2x2",
            PatternKind::LineH3 => "lineh3",
            PatternKind::LineV3 => "linev3",
            PatternKind::TShape => "tshape",
            PatternKind::LShape => "lshape",
            PatternKind::Plus => "plus",
        }
    }

    /// Human-readable name used as the pattern name
    pub fn display_name(&self) -> &'static str {
        match self {
            PatternKind::Single => "Single",
            PatternKind::Square2x2 => "Square 2x2",
            PatternKind::LineH3 => "Line H3",
            PatternKind::LineV3 => "Line V3",
            PatternKind::TShape => "T Shape",
            PatternKind::LShape => "L Shape",
            PatternKind::Plus => "Plus",
        }
    }
}

/// Visual orientation states (R0 = as-constructed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationState {
    R0,
    R90,
    R180,
    R270,
}

impl RotationState {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            RotationState::R0 => RotationState::R90,
            RotationState::R90 => RotationState::R180,
            RotationState::R180 => RotationState::R270,
            RotationState::R270 => RotationState::R0,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            RotationState::R0 => RotationState::R270,
            RotationState::R270 => RotationState::R180,
            RotationState::R180 => RotationState::R90,
            RotationState::R90 => RotationState::R0,
        }
    }

    /// Orientation counter 0-3 (0/90/180/270 degrees)
    pub fn index(&self) -> u8 {
        match self {
            RotationState::R0 => 0,
            RotationState::R90 => 1,
            RotationState::R180 => 2,
            RotationState::R270 => 3,
        }
    }

    pub fn degrees(&self) -> u16 {
        self.index() as u16 * 90
    }
}

/// Grid dimensions and cell size, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl GridConfig {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(DEMO_GRID_WIDTH, DEMO_GRID_HEIGHT, DEMO_CELL_SIZE)
    }
}

/// Notifications emitted by the grid engine, consumed by UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    EntityPlaced {
        entity: EntityId,
        cell: GridPos,
    },
    EntityMoved {
        entity: EntityId,
        from: GridPos,
        to: GridPos,
    },
    EntityRemoved {
        entity: EntityId,
        last_cell: GridPos,
    },
    CellClicked {
        cell: GridPos,
        entity: Option<EntityId>,
    },
}

/// User intents produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    PointerDown(PixelPos),
    PointerMove(PixelPos),
    PointerUp(PixelPos),
    Rotate,
    Cancel,
    SelectSlot(usize),
    ClearGrid,
    DumpSnapshot,
    Quit,
}
