//! TerminalDisplay: the crossterm-backed `GameDisplay`.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;

use tui_blocks_engine::GameDisplay;
use tui_blocks_input::handle_key_event;

use crate::core::GameSnapshot;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::GameAction;

/// Fallback when the terminal size cannot be queried.
const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

pub struct TerminalDisplay {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalDisplay {
    pub fn new(view: GameView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1),
        }
    }

    /// Acquire the terminal. See [`TerminalRenderer::enter`].
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    /// Release the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new(GameView::default())
    }
}

impl GameDisplay for TerminalDisplay {
    fn render(&mut self, snap: &GameSnapshot) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or(DEFAULT_VIEWPORT);
        self.view.render_into(snap, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw(&self.fb)
    }

    fn poll_action(&mut self, timeout: Duration) -> Result<Option<GameAction>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(handle_key_event(key)),
            Event::Resize(..) => {
                self.renderer.invalidate();
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}
