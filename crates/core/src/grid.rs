//! Grid module - settled blocks and the row-clear animation
//!
//! The grid has no cell array: it is the ordered list of settled blocks, and
//! occupancy is decided by position. Insertion order is kept so the last block
//! is always the most recently placed one (the spawner reads its color).
//!
//! Coordinates: rows grow downwards from the spawn row 1, columns are terminal
//! columns. A clearing row slides its blocks to the right across several ticks
//! before it is removed, so blocks in a queued row may temporarily sit past the
//! right wall.

use std::collections::HashMap;

use crate::types::{ColorId, Pos, ROW_CAPACITY, SLIDE_STEP, SPAWN_ROW};

/// A settled block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub pos: Pos,
    pub color: ColorId,
    /// Set once the block's row is queued for clearing
    pub sliding: bool,
    /// Columns travelled during the clear animation
    pub slid: i16,
}

impl Block {
    pub fn new(pos: Pos, color: ColorId) -> Self {
        Self {
            pos,
            color,
            sliding: false,
            slid: 0,
        }
    }
}

/// Result of scanning the grid for full rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScan {
    /// No block reached the spawn row; holds the number of newly queued rows
    Queued(usize),
    /// A block sits in the spawn row: the game is over
    Overflow,
}

/// The play field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i16,
    height: i16,
    blocks: Vec<Block>,
    /// Full rows awaiting the clear animation, sorted descending
    full_rows: Vec<i16>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: i16, height: i16) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
            full_rows: Vec::new(),
        }
    }

    /// Get width of the grid
    pub fn width(&self) -> i16 {
        self.width
    }

    /// Get height of the grid
    pub fn height(&self) -> i16 {
        self.height
    }

    /// Blocks that make a row full
    pub fn row_capacity(&self) -> usize {
        ROW_CAPACITY
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Rows waiting to be cleared, largest row index first
    pub fn full_rows(&self) -> &[i16] {
        &self.full_rows
    }

    pub fn is_clearing(&self) -> bool {
        !self.full_rows.is_empty()
    }

    /// Check if a settled block occupies `pos`
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.blocks.iter().any(|b| b.pos == pos)
    }

    /// Check if the active piece may not enter `pos`
    ///
    /// A row waiting in the clear queue is solid as a whole, even where its
    /// blocks have already slid away, so the active piece always stays above
    /// every queued row.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.full_rows.contains(&pos.row) || self.is_occupied(pos)
    }

    /// Color of the most recently placed block
    pub fn last_color(&self) -> Option<ColorId> {
        self.blocks.last().map(|b| b.color)
    }

    /// Add a piece's cells as settled blocks
    ///
    /// Positions are expected to be free; an active piece never overlaps the
    /// settled blocks because every move is checked first.
    pub fn settle(&mut self, cells: &[Pos], color: ColorId) {
        for &pos in cells {
            debug_assert!(!self.is_occupied(pos), "settling onto occupied {pos:?}");
            self.blocks.push(Block::new(pos, color));
        }
    }

    /// Scan for full rows and queue them for clearing
    ///
    /// A block in the spawn row means the stack overflowed: the scan stops
    /// there without queueing anything. Rows already in the queue are not
    /// queued twice.
    pub fn detect_full_rows(&mut self) -> RowScan {
        if self.blocks.iter().any(|b| b.pos.row == SPAWN_ROW) {
            return RowScan::Overflow;
        }

        let mut per_row: HashMap<i16, usize> = HashMap::new();
        let mut queued = 0;
        for block in &self.blocks {
            let count = per_row.entry(block.pos.row).or_insert(0);
            *count += 1;
            if *count == ROW_CAPACITY && !self.full_rows.contains(&block.pos.row) {
                self.full_rows.push(block.pos.row);
                queued += 1;
            }
        }

        for block in &mut self.blocks {
            if self.full_rows.contains(&block.pos.row) {
                block.sliding = true;
            }
        }
        self.full_rows.sort_unstable_by(|a, b| b.cmp(a));

        RowScan::Queued(queued)
    }

    /// Advance the clear animation by one tick
    ///
    /// Works on the back of the queue, i.e. the topmost queued row, so the
    /// collapse never shifts a row that is still waiting in the queue.
    /// Returns the row index when the row was removed on this tick.
    pub fn advance_clear(&mut self) -> Option<i16> {
        let row = *self.full_rows.last()?;
        let bound = self.width - 2;

        let mut done = false;
        for block in self.blocks.iter_mut().filter(|b| b.pos.row == row) {
            if block.slid >= bound {
                done = true;
            }
            if block.sliding {
                block.slid += SLIDE_STEP;
                block.pos.col += SLIDE_STEP;
            }
        }

        if !done {
            return None;
        }
        self.delete_row(row);
        self.full_rows.pop();
        Some(row)
    }

    /// Remove every block in `row` and move everything above it down one row
    pub fn delete_row(&mut self, row: i16) {
        self.blocks.retain(|b| b.pos.row != row);
        for block in &mut self.blocks {
            if block.pos.row < row {
                block.pos.row += 1;
            }
        }
    }

    /// Remove all blocks and pending rows
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.full_rows.clear();
    }

    /// Create from a block list for testing
    #[cfg(test)]
    pub fn from_blocks(width: i16, height: i16, blocks: Vec<Block>) -> Self {
        Self {
            width,
            height,
            blocks,
            full_rows: Vec::new(),
        }
    }
}
