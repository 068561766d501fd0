//! Shared types and constants for the stacker engine.
//!
//! Everything in here is plain data with no dependencies, so it can be used by
//! the core rules, the terminal view and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Cell size**: 20 pixels (only meaningful to pixel-based renderers)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_INTERVAL_MS` | 1000 | Time between gravity steps |
//! | `FRAME_MS` | 16 | Default tick period of the terminal host (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_stacker_types::{Command, ShapeName, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeName::S.as_str(), "S");
//! assert_eq!(Command::FastDrop.as_str(), "fastDrop");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Size of one cell in pixels for pixel-based render adapters
pub const CELL_SIZE: u32 = 20;

/// Default time between automatic gravity steps
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 1000;

/// Default tick period of the terminal host (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Points awarded for each row removed by a single lock
pub const POINTS_PER_ROW: u32 = 10;

/// The seven piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeName {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeName {
    /// Every shape, in catalog order
    pub const ALL: [ShapeName; 7] = [
        ShapeName::I,
        ShapeName::O,
        ShapeName::T,
        ShapeName::S,
        ShapeName::Z,
        ShapeName::J,
        ShapeName::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeName::I => "I",
            ShapeName::O => "O",
            ShapeName::T => "T",
            ShapeName::S => "S",
            ShapeName::Z => "Z",
            ShapeName::J => "J",
            ShapeName::L => "L",
        }
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Player commands accepted by the engine
///
/// All commands are fire-and-forget: an illegal command leaves the engine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new game (or restart the current one)
    Start,
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Move the active piece one row down
    MoveDown,
    /// Advance to the next rotation state
    Rotate,
    /// Let gravity step on every tick until the piece locks
    FastDrop,
}

impl Command {
    /// camelCase name, as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::Rotate => "rotate",
            Command::FastDrop => "fastDrop",
        }
    }
}

/// Engine lifecycle state
///
/// `Idle` → `Running` → `GameOver` → (restart) → `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnginePhase {
    #[default]
    Idle,
    Running,
    GameOver,
}

impl EnginePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnginePhase::Idle => "idle",
            EnginePhase::Running => "running",
            EnginePhase::GameOver => "game_over",
        }
    }
}

/// Lifecycle notification published by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Started,
    GameOver,
    ScoreChanged(u32),
}
