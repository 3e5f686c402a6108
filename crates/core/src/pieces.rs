//! Pieces module - spawn templates and pivot rotation
//!
//! Pieces are stored as absolute cell positions rather than shape + origin:
//! rotation rewrites the cells directly around the piece's second cell, so
//! there is no notion of a rotation state.

use arrayvec::ArrayVec;

use crate::types::{ColorId, Pos, ShapeKind, CELL_SPAN};

/// Cells of one piece
pub type PieceCells = ArrayVec<Pos, 4>;

/// Index of the cell every rotation turns around
pub const PIVOT_INDEX: usize = 1;

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: ColorId,
    pub cells: PieceCells,
}

impl Piece {
    /// Create a piece of `kind` at its spawn template around `center`
    pub fn spawn(kind: ShapeKind, color: ColorId, center: i16) -> Self {
        Self {
            kind,
            color,
            cells: spawn_cells(kind, center).into_iter().collect(),
        }
    }

    /// Copy of this piece moved by `(d_row, d_col)`
    pub fn translated(&self, d_row: i16, d_col: i16) -> Self {
        Self {
            cells: self.cells.iter().map(|c| c.offset(d_row, d_col)).collect(),
            ..self.clone()
        }
    }
}

/// Spawn template for a shape, columns relative to `center`
///
/// Each shape has exactly one canonical orientation at spawn.
pub fn spawn_cells(kind: ShapeKind, center: i16) -> [Pos; 4] {
    let c = center;
    let s = CELL_SPAN;
    match kind {
        ShapeKind::I => [
            Pos::new(1, c - s),
            Pos::new(1, c),
            Pos::new(1, c + s),
            Pos::new(1, c + 2 * s),
        ],
        ShapeKind::Z => [
            Pos::new(1, c - s),
            Pos::new(1, c),
            Pos::new(2, c),
            Pos::new(2, c + s),
        ],
        ShapeKind::T => [
            Pos::new(2, c - s),
            Pos::new(2, c),
            Pos::new(2, c + s),
            Pos::new(1, c),
        ],
        ShapeKind::O => [
            Pos::new(2, c - s),
            Pos::new(1, c - s),
            Pos::new(2, c),
            Pos::new(1, c),
        ],
        ShapeKind::S => [
            Pos::new(2, c - s),
            Pos::new(2, c),
            Pos::new(1, c + s),
            Pos::new(1, c),
        ],
        ShapeKind::J => [
            Pos::new(2, c - s),
            Pos::new(2, c),
            Pos::new(2, c + s),
            Pos::new(1, c - s),
        ],
        ShapeKind::L => [
            Pos::new(2, c - s),
            Pos::new(2, c),
            Pos::new(2, c + s),
            Pos::new(1, c + s),
        ],
    }
}

/// Compute the cells of a quarter turn around the pivot cell
///
/// This is an approximation of a 90° turn tuned for 2-column-wide cells:
/// row offsets become column offsets scaled by -2, and column offsets become
/// row offsets halved with truncation toward zero. The asymmetry is part of
/// how pieces feel in play and is kept exactly.
///
/// Returns `None` when there are fewer than 2 cells (no pivot). The O shape
/// returns its cells unchanged.
pub fn rotated_cells(kind: ShapeKind, cells: &[Pos]) -> Option<PieceCells> {
    let pivot = *cells.get(PIVOT_INDEX)?;
    if kind == ShapeKind::O {
        return Some(cells.iter().copied().collect());
    }

    let turned = cells
        .iter()
        .map(|cell| {
            let d_row = cell.row - pivot.row;
            let d_col = cell.col - pivot.col;
            if d_col == 0 {
                // Above/below the pivot: swing onto the pivot row.
                Pos::new(pivot.row, pivot.col - CELL_SPAN * d_row)
            } else if d_row == 0 {
                // Beside the pivot: swing onto the pivot column.
                Pos::new(pivot.row + d_col / CELL_SPAN, pivot.col)
            } else {
                Pos::new(pivot.row + d_col / CELL_SPAN, pivot.col - CELL_SPAN * d_row)
            }
        })
        .collect();
    Some(turned)
}
