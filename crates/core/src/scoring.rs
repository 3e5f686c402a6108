//! Scoring module - score, level and gravity progression
//!
//! One point per cleared row. Every `LEVEL_UP_EVERY` points the level goes up
//! and gravity gets `GRAVITY_STEP_MS` faster, bottoming out at
//! `GRAVITY_FLOOR_MS`.

use crate::types::{BASE_GRAVITY_MS, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS, LEVEL_UP_EVERY};

/// Session progress counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    /// Milliseconds between gravity drops
    pub gravity_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            gravity_ms: BASE_GRAVITY_MS,
        }
    }

    /// Record one cleared row
    ///
    /// Returns true when this row raised the level.
    pub fn record_row(&mut self) -> bool {
        self.score += 1;
        if self.score % LEVEL_UP_EVERY != 0 {
            return false;
        }
        self.level += 1;
        self.gravity_ms = next_gravity_ms(self.gravity_ms);
        true
    }

    /// Gravity interval expressed in loop ticks, never less than one
    pub fn gravity_ticks(&self, poll_timeout_ms: u32) -> u32 {
        (self.gravity_ms / poll_timeout_ms.max(1)).max(1)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Gravity interval after one level-up
pub fn next_gravity_ms(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(GRAVITY_STEP_MS)
        .max(GRAVITY_FLOOR_MS)
}
