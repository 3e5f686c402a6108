use crate::pieces::{Piece, PieceCells};
use crate::types::{ColorId, Pos, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: ColorId,
    pub cells: PieceCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            cells: value.cells.clone(),
        }
    }
}

/// Everything the display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: i16,
    pub height: i16,
    /// Settled blocks, oldest first
    pub blocks: Vec<(Pos, ColorId)>,
    pub active: Option<ActiveSnapshot>,
    /// Landing preview, absent when hidden or too close
    pub ghost: Option<PieceCells>,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Header line: score and level, or the pause banner
    pub panel_text: String,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            blocks: Vec::new(),
            active: None,
            ghost: None,
            score: 0,
            level: 1,
            paused: false,
            game_over: false,
            panel_text: String::new(),
        }
    }
}
