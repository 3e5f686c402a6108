//! Game loop (engine-facing).
//!
//! Drives [`GameState`] one tick per input poll: update the rules, render a
//! snapshot, then wait up to one poll timeout for a key. Everything runs on the
//! caller's thread; the display is borrowed for the whole run and never
//! stored, so acquiring and releasing it stays with the caller.

use std::time::Duration;

use anyhow::Result;
use log::{debug, info};

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

use crate::core::{GameSnapshot, GameState};
use crate::types::{GameAction, POLL_TIMEOUT_MS};

/// Display and input device the loop talks to.
pub trait GameDisplay {
    /// Draw one frame.
    fn render(&mut self, snap: &GameSnapshot) -> Result<()>;

    /// Wait at most `timeout` for one decoded action.
    fn poll_action(&mut self, timeout: Duration) -> Result<Option<GameAction>>;
}

/// Fixed-timer game loop.
pub struct GameLoop {
    state: GameState,
    snapshot: GameSnapshot,
    poll_timeout_ms: u32,
    frames: u64,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self::with_poll_timeout(state, POLL_TIMEOUT_MS)
    }

    pub fn with_poll_timeout(state: GameState, poll_timeout_ms: u32) -> Self {
        Self {
            state,
            snapshot: GameSnapshot::default(),
            poll_timeout_ms: poll_timeout_ms.max(1),
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms as u64)
    }

    /// One loop iteration.
    pub fn step<D: GameDisplay>(&mut self, display: &mut D) -> Result<()> {
        self.state.update(self.poll_timeout_ms);

        // Snapshot reuse keeps the per-frame path allocation-free after warmup.
        self.state.snapshot_into(&mut self.snapshot);
        display.render(&self.snapshot)?;
        self.frames += 1;

        if let Some(action) = display.poll_action(self.poll_timeout())? {
            let applied = self.state.apply_action(action);
            debug!("action {} applied={applied}", action.as_str());
        }
        Ok(())
    }

    /// Run until the player quits.
    pub fn run<D: GameDisplay>(&mut self, display: &mut D) -> Result<()> {
        info!(
            "session start: seed {} poll {}ms",
            self.state.seed(),
            self.poll_timeout_ms
        );
        while !self.state.quit() {
            self.step(display)?;
        }
        info!(
            "session end: score {} level {} after {} frames",
            self.state.score(),
            self.state.level(),
            self.frames
        );
        Ok(())
    }
}
