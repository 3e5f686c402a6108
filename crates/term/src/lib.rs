//! Terminal rendering for the block game.
//!
//! A small, game-oriented rendering layer: the snapshot is laid out into a
//! framebuffer by [`GameView`], and [`TerminalRenderer`] flushes only the
//! cells that changed. [`TerminalDisplay`] ties both to crossterm input and
//! is what the game loop drives.

pub mod display;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use display::TerminalDisplay;
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{block_color, GameView, Viewport};
pub use renderer::{check_color_support, encode_diff_into, encode_full_into, TerminalRenderer};
