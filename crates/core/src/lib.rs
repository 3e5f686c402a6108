//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule below
//! - **Portable**: Can run behind any display (terminal, headless test double)
//!
//! # Module Structure
//!
//! - [`grid`]: settled blocks, full-row detection and the sliding clear animation
//! - [`game_state`]: active piece, collisions, spawning, timing and actions
//! - [`pieces`]: spawn templates and pivot rotation
//! - [`rng`]: seeded dice for shapes and colors
//! - [`scoring`]: score, level and gravity progression
//! - [`snapshot`]: read-only view handed to the renderer
//!
//! # Game Rules
//!
//! - **Grid**: 26x26 terminal cells, blocks are 2 columns wide, 12 blocks fill a row
//! - **Spawning**: uniform shape, uniform color never equal to the last settled block
//! - **Rotation**: quarter turn around the piece's second cell, no wall kicks, O never turns
//! - **Landing**: a blocked downward move settles the piece immediately (no lock delay)
//! - **Clearing**: full rows slide off to the right over a few ticks, then collapse
//! - **Scoring**: 1 point per row, level up and faster gravity every 5 points
//! - **Game over**: a settled block in the spawn row
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::GameState;
//! use tui_blocks_types::{GameAction, POLL_TIMEOUT_MS};
//!
//! let mut game = GameState::new(12345);
//! game.update(POLL_TIMEOUT_MS); // spawns the first piece
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The dropped piece is now part of the grid and a new one is falling.
//! assert_eq!(game.grid().blocks().len(), 4);
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! The game advances in loop ticks of one input-poll timeout. Gravity moves
//! the piece every `gravity_ms / poll_timeout` ticks; call
//! [`GameState::update`](game_state::GameState::update) once per tick.

pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, PAUSED_BANNER};
pub use grid::{Block, Grid, RowScan};
pub use pieces::{rotated_cells, spawn_cells, Piece, PieceCells};
pub use rng::SimpleRng;
pub use scoring::Progress;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
