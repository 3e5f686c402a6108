//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The game core
//! only ever sees logical actions; key codes stop here.

pub mod map;

pub use tui_blocks_types as types;

pub use map::{handle_key_event, is_interrupt};
