//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, in terminal cells:
//!
//! ```text
//! x0          x0+W  x0+W+2
//! ┌──────────┐                    row 0   header box
//! │ score... │
//! └──────────┘
//! ┌──────────┐      instructions  row 2   play window (H rows)
//! │          │
//! |__________|
//! ```

use crate::core::GameSnapshot;
use crossterm::style::Color;

use crate::fb::{CellStyle, FrameBuffer, BLACK, WHITE};
use crate::types::{ColorId, Pos, CELL_SPAN};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub const HEADER_HEIGHT: u16 = 3;
pub const GAME_OVER_TEXT: &str = "game over.";
pub const PLAY_AGAIN_TEXT: &str = "play again? y/n";

/// Key help shown beside the play window.
pub const INSTRUCTIONS: &[&str] = &[
    "left/right  move",
    "down        soft drop",
    "space       rotate",
    "d           hard drop",
    "a           toggle ghost",
    "p           pause",
    "ctrl-c      quit",
];

/// Background for a block color id. Unknown ids draw white.
///
/// Only the eight base terminal colors are used.
pub fn block_color(color: ColorId) -> Color {
    match color {
        1 => Color::DarkRed,
        2 => Color::DarkCyan,
        3 => Color::DarkBlue,
        4 => Color::DarkYellow,
        5 => Color::DarkGreen,
        _ => WHITE,
    }
}

/// Draws the header, the play window and the instructions panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Left edge of the header and the play window.
    origin_x: u16,
    /// Top edge of the play window.
    origin_y: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            origin_x: 10,
            origin_y: 2,
        }
    }
}

impl GameView {
    pub fn new(origin_x: u16, origin_y: u16) -> Self {
        Self {
            origin_x,
            origin_y: origin_y.max(HEADER_HEIGHT - 1),
        }
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.origin_x, self.origin_y)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// The framebuffer is resized to the viewport; anything outside it is
    /// clipped.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let w = snap.width.max(2) as u16;
        let h = snap.height.max(2) as u16;
        let text = CellStyle::default();

        self.draw_box(fb, self.origin_x, 0, w, HEADER_HEIGHT, text);
        fb.put_str(self.origin_x + 1, 1, &snap.panel_text, text);

        self.draw_window_border(fb, w, h, text);

        for &(pos, color) in &snap.blocks {
            self.draw_cell(fb, snap, pos, block_color(color));
        }
        if let Some(ghost) = &snap.ghost {
            for &pos in ghost {
                self.draw_cell(fb, snap, pos, WHITE);
            }
        }
        if let Some(active) = &snap.active {
            for &pos in &active.cells {
                self.draw_cell(fb, snap, pos, block_color(active.color));
            }
        }

        if snap.game_over {
            let (row, col) = (snap.height / 2 - 2, snap.width / 2 - 5);
            self.put_in_window(fb, snap, row, col, GAME_OVER_TEXT);
            let (row, col) = (snap.height / 2 - 1, snap.width / 2 - 7);
            self.put_in_window(fb, snap, row, col, PLAY_AGAIN_TEXT);
        }

        let panel_x = self.origin_x + w + 2;
        for (i, line) in INSTRUCTIONS.iter().enumerate() {
            fb.put_str(panel_x, self.origin_y + 1 + i as u16, line, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_box(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Play window frame: box-drawn top and sides, an underscore floor.
    fn draw_window_border(&self, fb: &mut FrameBuffer, w: u16, h: u16, style: CellStyle) {
        let (x, y) = (self.origin_x, self.origin_y);
        let floor = y + h - 1;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, floor, '_', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
        fb.put_char(x, floor, '|', style);
        fb.put_char(x + w - 1, floor, '|', style);
    }

    /// One logical cell, `CELL_SPAN` columns wide, clipped to the window.
    fn draw_cell(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, pos: Pos, bg: Color) {
        let style = CellStyle::new(BLACK, bg);
        for dx in 0..CELL_SPAN {
            if let Some((x, y)) = self.window_to_screen(snap, pos.row, pos.col + dx) {
                fb.put_char(x, y, ' ', style);
            }
        }
    }

    fn put_in_window(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, row: i16, col: i16, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            if let Some((x, y)) = self.window_to_screen(snap, row, col + i as i16) {
                fb.put_char(x, y, ch, CellStyle::default());
            }
        }
    }

    fn window_to_screen(&self, snap: &GameSnapshot, row: i16, col: i16) -> Option<(u16, u16)> {
        if row < 0 || row >= snap.height || col < 0 || col >= snap.width {
            return None;
        }
        Some((self.origin_x + col as u16, self.origin_y + row as u16))
    }
}
