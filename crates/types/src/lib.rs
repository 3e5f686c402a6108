//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable from the core rules, the game loop and the terminal renderer alike.
//!
//! # Grid Dimensions
//!
//! The play field is measured in terminal cells:
//!
//! - **Width**: 26 columns, of which column 0 and the last columns are walls
//! - **Height**: 26 rows, row 1 is the spawn row, row `GRID_HEIGHT` is the floor
//! - **Cell span**: every logical block is drawn 2 columns wide, so piece
//!   columns always step by 2 and stay odd (1, 3, ..., 23)
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POLL_TIMEOUT_MS` | 50 | Input poll timeout, one loop tick |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `GRAVITY_STEP_MS` | 50 | Gravity speed-up per level |
//! | `GRAVITY_FLOOR_MS` | 50 | Fastest gravity interval |
//! | `LEVEL_UP_EVERY` | 5 | Cleared rows per level |
//! | `SLIDE_STEP` | 5 | Columns a clearing row slides per tick |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{GameAction, Pos, ShapeKind, GRID_WIDTH, ROW_CAPACITY};
//!
//! // Shapes are drawn from a 1..=7 roll in a fixed order.
//! assert_eq!(ShapeKind::from_roll(1), Some(ShapeKind::I));
//! assert_eq!(ShapeKind::from_roll(4), Some(ShapeKind::O));
//!
//! // Actions log under their camelCase names.
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//!
//! // A full row holds one block per two columns inside the walls.
//! assert_eq!(ROW_CAPACITY as i16, (GRID_WIDTH - 2) / 2);
//!
//! let p = Pos::new(3, 5).offset(1, -2);
//! assert_eq!(p, Pos::new(4, 3));
//! ```

/// Grid width in terminal columns
pub const GRID_WIDTH: i16 = 26;

/// Grid height in terminal rows
pub const GRID_HEIGHT: i16 = 26;

/// Terminal columns covered by one block
pub const CELL_SPAN: i16 = 2;

/// Number of blocks that make a row full
pub const ROW_CAPACITY: usize = ((GRID_WIDTH - 2) / CELL_SPAN) as usize;

/// Row pieces spawn into. A settled block here ends the game.
pub const SPAWN_ROW: i16 = 1;

/// Input poll timeout in milliseconds. Each poll is one loop tick.
pub const POLL_TIMEOUT_MS: u32 = 50;

/// Gravity interval at level 1 (one row per second)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const GRAVITY_STEP_MS: u32 = 50;

/// Fastest possible gravity interval
pub const GRAVITY_FLOOR_MS: u32 = 50;

/// Score points needed per level
pub const LEVEL_UP_EVERY: u32 = 5;

/// Columns a clearing row slides right on each animation tick
pub const SLIDE_STEP: i16 = 5;

/// Number of block colors (ids 1..=COLOR_COUNT)
pub const COLOR_COUNT: u32 = 5;

/// The ghost piece is hidden when it would sit closer than this many rows
pub const GHOST_MIN_GAP: i16 = 10;


/// Block color id, 1..=`COLOR_COUNT`
pub type ColorId = u8;

/// A (row, column) position on the grid.
///
/// Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i16,
    pub col: i16,
}

impl Pos {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Position shifted by `(d_row, d_col)`
    pub const fn offset(self, d_row: i16, d_col: i16) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// The seven tetromino shapes, in spawn roll order
///
/// - **I**: horizontal bar
/// - **Z**: Z-shaped
/// - **T**: T-shaped
/// - **O**: 2x2 square, never rotates
/// - **S**: S-shaped (mirror of Z)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    Z,
    T,
    O,
    S,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in roll order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::Z,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Map a 1..=7 roll to a shape
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_roll(2), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_roll(7), Some(ShapeKind::L));
    /// assert_eq!(ShapeKind::from_roll(0), None);
    /// assert_eq!(ShapeKind::from_roll(8), None);
    /// ```
    pub fn from_roll(roll: u32) -> Option<Self> {
        match roll {
            1..=7 => Some(Self::ALL[(roll - 1) as usize]),
            _ => None,
        }
    }

    /// Upper-case letter of the shape
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::Z => "Z",
            ShapeKind::T => "T",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }
}

/// Logical actions decoded from player input
///
/// The platform input layer maps raw keys to these; the core never sees key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one block left
    MoveLeft,
    /// Move piece one block right
    MoveRight,
    /// Move piece one row down (settles it when blocked)
    SoftDrop,
    /// Rotate piece around its pivot cell
    Rotate,
    /// Drop piece until it settles
    HardDrop,
    /// Show or hide the ghost piece
    ToggleGhost,
    /// Start a new game after game over
    Confirm,
    /// Leave the game after game over
    Decline,
    /// Toggle pause state
    TogglePause,
    /// Leave immediately from any state (Ctrl-C)
    Interrupt,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::ToggleGhost => "toggleGhost",
            GameAction::Confirm => "confirm",
            GameAction::Decline => "decline",
            GameAction::TogglePause => "togglePause",
            GameAction::Interrupt => "interrupt",
        }
    }
}

/// Game loop states
///
/// `Running` is the initial state. `GameOver` is only entered by grid overflow,
/// `Quit` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
    Quit,
}

/// Outcome of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Clear,
    Blocked,
}

impl Collision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Collision::Blocked)
    }
}
