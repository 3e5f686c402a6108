//! Game state module - manages the complete game state
//!
//! This module ties together the grid, pieces, RNG and scoring. It owns the
//! collision rules, spawning, the per-tick update and the action dispatch used
//! by the game loop.
//!
//! Landing is a side effect of a blocked downward move: the check that finds
//! the floor (or the stack straight below) also settles the piece and spawns
//! the next one. The check is split into a pure classification and a commit step so the
//! grid is never mutated while the piece is being inspected.

use std::fmt::Write;

use log::{debug, info};

use crate::grid::{Grid, RowScan};
use crate::pieces::{rotated_cells, Piece, PieceCells};
use crate::rng::SimpleRng;
use crate::scoring::Progress;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Header text while paused
pub const PAUSED_BANNER: &str = "- game paused - ";

/// What a translation would do, before anything is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveOutcome {
    Clear,
    /// Wall, or the stack beside the piece
    Blocked,
    /// Floor, or the stack straight below: the piece settles
    Landed,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<Piece>,
    rng: SimpleRng,
    progress: Progress,
    /// Loop ticks since the last gravity drop
    tick: u32,
    phase: Phase,
    show_ghost: bool,
    /// Monotonic id for spawned pieces
    piece_id: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    ///
    /// The first piece is spawned by the first [`GameState::update`].
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(GRID_WIDTH, GRID_HEIGHT),
            active: None,
            rng: SimpleRng::new(seed),
            progress: Progress::new(),
            tick: 0,
            phase: Phase::Running,
            show_ghost: true,
            piece_id: 0,
        }
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn quit(&self) -> bool {
        self.phase == Phase::Quit
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn gravity_ms(&self) -> u32 {
        self.progress.gravity_ms
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn show_ghost(&self) -> bool {
        self.show_ghost
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access, for setting up positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Classify a translation of the active piece without changing anything
    ///
    /// Cells are inspected in order and the first offending cell decides.
    fn classify_translation(&self, d_row: i16, d_col: i16) -> MoveOutcome {
        let Some(active) = self.active.as_ref() else {
            return MoveOutcome::Blocked;
        };
        let width = self.grid.width();
        let height = self.grid.height();

        for cell in &active.cells {
            let next = cell.offset(d_row, d_col);
            if next.col <= 0 || next.col >= width - 2 {
                return MoveOutcome::Blocked;
            }
            if next.row >= height {
                return MoveOutcome::Landed;
            }
            if self.grid.is_blocked(next) {
                return if d_col == 0 {
                    MoveOutcome::Landed
                } else {
                    MoveOutcome::Blocked
                };
            }
        }
        MoveOutcome::Clear
    }

    /// Check a translation of the active piece by `(d_row, d_col)`
    ///
    /// A downward move into the floor or the stack settles the piece and
    /// spawns the next one before reporting `Blocked`.
    pub fn check_translation(&mut self, d_row: i16, d_col: i16) -> Collision {
        match self.classify_translation(d_row, d_col) {
            MoveOutcome::Clear => Collision::Clear,
            MoveOutcome::Blocked => Collision::Blocked,
            MoveOutcome::Landed => {
                self.spawn_piece();
                Collision::Blocked
            }
        }
    }

    /// Check proposed rotation cells against walls, floor, ceiling and stack
    pub fn check_rotation_collision(&self, cells: &[Pos]) -> Collision {
        let width = self.grid.width();
        let height = self.grid.height();
        let blocked = cells.iter().any(|p| {
            p.col < 0
                || p.col > width - 2
                || p.row < SPAWN_ROW
                || p.row > height - 1
                || self.grid.is_blocked(*p)
        });
        if blocked {
            Collision::Blocked
        } else {
            Collision::Clear
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, d_row: i16, d_col: i16) -> bool {
        if self.check_translation(d_row, d_col).is_blocked() {
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            *active = active.translated(d_row, d_col);
            return true;
        }
        false
    }

    /// Rotate the active piece around its pivot cell
    ///
    /// Rejected without side effects when the turned cells collide.
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        if active.kind == ShapeKind::O {
            return true;
        }
        let Some(turned) = rotated_cells(active.kind, &active.cells) else {
            return false;
        };
        if self.check_rotation_collision(&turned).is_blocked() {
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.cells = turned;
        }
        true
    }

    /// Drop the active piece until it settles
    ///
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }
        let mut rows = 0;
        while self.try_move(1, 0) {
            rows += 1;
        }
        rows
    }

    /// Settle the active piece and spawn a random new one
    ///
    /// The color is drawn after settling, so it differs from the piece that
    /// just landed.
    pub fn spawn_piece(&mut self) -> bool {
        if !self.settle_active() {
            return false;
        }
        let color = self.pick_color();
        let roll = self.rng.roll(ShapeKind::ALL.len() as u32);
        let kind = ShapeKind::from_roll(roll).unwrap_or(ShapeKind::I);
        self.place_piece(kind, color)
    }

    /// Settle the active piece and spawn a piece of the given shape and color
    pub fn spawn_piece_of(&mut self, kind: ShapeKind, color: ColorId) -> bool {
        if !self.settle_active() {
            return false;
        }
        self.place_piece(kind, color)
    }

    /// Merge the active piece into the grid and scan for full rows
    ///
    /// Returns false when the grid overflowed and the game is over.
    fn settle_active(&mut self) -> bool {
        if let Some(prev) = self.active.take() {
            self.grid.settle(&prev.cells, prev.color);
            debug!("settled {} at {:?}", prev.kind.as_str(), prev.cells.as_slice());
        }

        match self.grid.detect_full_rows() {
            RowScan::Overflow => {
                info!(
                    "game over: score {} level {}",
                    self.progress.score, self.progress.level
                );
                self.phase = Phase::GameOver;
                false
            }
            RowScan::Queued(n) => {
                if n > 0 {
                    debug!("queued {n} full rows: {:?}", self.grid.full_rows());
                }
                true
            }
        }
    }

    /// Put a new piece at the spawn position
    ///
    /// A stack that already covers the spawn cells ends the game the same way
    /// an overflow does; the piece is never placed on top of settled blocks.
    fn place_piece(&mut self, kind: ShapeKind, color: ColorId) -> bool {
        let piece = Piece::spawn(kind, color, self.grid.width() / 2);
        if piece.cells.iter().any(|c| self.grid.is_blocked(*c)) {
            info!(
                "game over: no room to spawn {}, score {} level {}",
                kind.as_str(),
                self.progress.score,
                self.progress.level
            );
            self.phase = Phase::GameOver;
            return false;
        }
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        debug!("spawned {} color {color}", kind.as_str());
        true
    }

    /// Uniform color that differs from the last settled block
    fn pick_color(&mut self) -> ColorId {
        let last = self.grid.last_color();
        loop {
            let color = self.rng.roll(COLOR_COUNT) as ColorId;
            if Some(color) != last {
                return color;
            }
        }
    }

    /// Advance the row-clear animation, scoring the row once it is removed
    ///
    /// The active piece sits above every queued row, so it collapses with the
    /// stack above the removed row and never meets a block that moved down.
    pub fn advance_clear(&mut self) -> Option<i16> {
        let row = self.grid.advance_clear()?;
        if let Some(active) = self.active.as_mut() {
            for cell in active.cells.iter_mut().filter(|c| c.row < row) {
                cell.row += 1;
            }
        }
        let leveled = self.progress.record_row();
        debug!("cleared row {row}, score {}", self.progress.score);
        if leveled {
            info!(
                "level {} reached, gravity {}ms",
                self.progress.level, self.progress.gravity_ms
            );
        }
        Some(row)
    }

    /// One loop tick of game logic: gravity, spawning and clear animation
    ///
    /// Rendering and input are left to the caller. Nothing advances once the
    /// game is over.
    pub fn update(&mut self, poll_timeout_ms: u32) {
        if matches!(self.phase, Phase::GameOver | Phase::Quit) {
            return;
        }

        self.tick += 1;
        if self.tick >= self.progress.gravity_ticks(poll_timeout_ms) {
            self.tick = 0;
            if self.phase == Phase::Running {
                self.try_move(1, 0);
            }
        }
        if self.phase == Phase::GameOver {
            return;
        }

        if self.active.is_none() {
            self.spawn_piece();
        }
        if self.grid.is_clearing() {
            self.advance_clear();
        }
    }

    /// Apply a game action
    ///
    /// Piece actions only work while running. Confirm and decline only work
    /// after game over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Interrupt => {
                self.phase = Phase::Quit;
                true
            }
            GameAction::Confirm => self.reset(),
            GameAction::Decline => {
                if self.phase != Phase::GameOver {
                    return false;
                }
                info!("player declined another game");
                self.phase = Phase::Quit;
                true
            }
            GameAction::TogglePause => match self.phase {
                Phase::Running => {
                    self.phase = Phase::Paused;
                    true
                }
                Phase::Paused => {
                    self.phase = Phase::Running;
                    true
                }
                Phase::GameOver | Phase::Quit => false,
            },
            GameAction::ToggleGhost => {
                self.show_ghost = !self.show_ghost;
                true
            }
            _ if self.phase != Phase::Running => false,
            GameAction::MoveLeft => self.try_move(0, -CELL_SPAN),
            GameAction::MoveRight => self.try_move(0, CELL_SPAN),
            GameAction::SoftDrop => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
        }
    }

    /// Start over after game over
    ///
    /// Clears the grid, the full-row queue, the active piece, score, level,
    /// gravity and tick counter. The RNG keeps running.
    pub fn reset(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.grid.clear();
        self.active = None;
        self.progress = Progress::new();
        self.tick = 0;
        self.phase = Phase::Running;
        info!("new game");
        true
    }

    /// Cells of the landing preview, if it should be shown
    ///
    /// The preview drops the piece by the smallest gap between any of its
    /// cells and the floor or a settled block below it in the same column.
    /// Small gaps hide the preview.
    pub fn ghost_cells(&self) -> Option<PieceCells> {
        let active = self.active.as_ref()?;
        let height = self.grid.height();

        let mut gap = height;
        for cell in &active.cells {
            gap = gap.min(height - cell.row);
            for block in self.grid.blocks() {
                if block.pos.col == cell.col && block.pos.row > cell.row {
                    gap = gap.min(block.pos.row - cell.row);
                }
            }
            for &row in self.grid.full_rows() {
                if row > cell.row {
                    gap = gap.min(row - cell.row);
                }
            }
        }
        if gap < GHOST_MIN_GAP {
            return None;
        }
        Some(active.cells.iter().map(|c| c.offset(gap - 1, 0)).collect())
    }

    /// Header text: score and level, or the pause banner
    pub fn panel_text(&self) -> String {
        let mut text = String::new();
        self.write_panel_text(&mut text);
        text
    }

    /// Write the header text into `out`, reusing its allocation
    fn write_panel_text(&self, out: &mut String) {
        out.clear();
        if self.paused() {
            out.push_str(PAUSED_BANNER);
        } else {
            // Writing into a String cannot fail.
            let _ = write!(
                out,
                " score:{}  level:{}",
                self.progress.score, self.progress.level
            );
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.blocks.clear();
        out.blocks
            .extend(self.grid.blocks().iter().map(|b| (b.pos, b.color)));
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost = if self.show_ghost {
            self.ghost_cells()
        } else {
            None
        };
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.paused = self.paused();
        out.game_over = self.game_over();
        self.write_panel_text(&mut out.panel_text);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(state: &mut GameState, row: i16, color: ColorId) {
        let cells: Vec<Pos> = (0..ROW_CAPACITY as i16)
            .map(|i| Pos::new(row, 1 + CELL_SPAN * i))
            .collect();
        state.grid_mut().settle(&cells, color);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.gravity_ms(), BASE_GRAVITY_MS);
        assert!(state.active().is_none());
        assert!(state.show_ghost());
        assert!(state.grid().blocks().is_empty());
    }

    #[test]
    fn test_first_update_spawns() {
        let mut state = GameState::new(12345);
        state.update(POLL_TIMEOUT_MS);

        let active = state.active().unwrap();
        assert_eq!(active.cells.len(), 4);
        assert!((1..=COLOR_COUNT as u8).contains(&active.color));
        assert_eq!(state.piece_id(), 1);
    }

    #[test]
    fn test_walls_block_without_settling() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::O, 1);

        let mut moves = 0;
        while state.try_move(0, -CELL_SPAN) {
            moves += 1;
        }
        // O spawns at columns 11 and 13; leftmost column is 1.
        assert_eq!(moves, 5);
        assert_eq!(state.check_translation(0, -CELL_SPAN), Collision::Blocked);
        assert!(state.grid().blocks().is_empty());
        assert_eq!(state.active().unwrap().kind, ShapeKind::O);
    }

    #[test]
    fn test_right_wall() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::I, 1);
        while state.try_move(0, CELL_SPAN) {}
        let max_col = state.active().unwrap().cells.iter().map(|c| c.col).max();
        assert_eq!(max_col, Some(GRID_WIDTH - 3));
    }

    #[test]
    fn test_floor_settles_and_spawns() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::I, 3);
        while state.try_move(1, 0) {}

        let settled: Vec<Pos> = state.grid().blocks().iter().map(|b| b.pos).collect();
        assert_eq!(settled.len(), 4);
        assert!(settled.iter().all(|p| p.row == GRID_HEIGHT - 1));
        assert!(state.grid().blocks().iter().all(|b| b.color == 3));
        assert_eq!(state.piece_id(), 2);
        assert_ne!(state.active().unwrap().color, 3);
    }

    #[test]
    fn test_sideways_into_stack_does_not_settle() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::O, 1);
        // Block to the left of the O at row 2.
        state.grid_mut().settle(&[Pos::new(2, 9)], 2);

        assert_eq!(state.check_translation(0, -CELL_SPAN), Collision::Blocked);
        assert_eq!(state.grid().blocks().len(), 1);
        assert_eq!(state.piece_id(), 1);
    }

    #[test]
    fn test_landing_on_stack_settles() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::O, 1);
        state.grid_mut().settle(&[Pos::new(10, 11)], 2);

        let mut drops = 0;
        while state.try_move(1, 0) {
            drops += 1;
        }
        // Bottom row of the O stops at row 9.
        assert_eq!(drops, 7);
        assert_eq!(state.grid().blocks().len(), 5);
        assert!(state.grid().is_occupied(Pos::new(9, 11)));
        assert!(state.grid().is_occupied(Pos::new(8, 13)));
    }

    #[test]
    fn test_rotation_blocked_by_ceiling() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::I, 1);
        let before = state.active().unwrap().cells.clone();
        // Turned I would reach row 0.
        assert!(!state.try_rotate());
        assert_eq!(state.active().unwrap().cells, before);

        state.try_move(1, 0);
        assert!(state.try_rotate());
        let cols: Vec<i16> = state.active().unwrap().cells.iter().map(|c| c.col).collect();
        assert_eq!(cols, vec![13, 13, 13, 13]);
    }

    #[test]
    fn test_rotation_blocked_by_stack() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::I, 1);
        state.try_move(1, 0);
        state.grid_mut().settle(&[Pos::new(4, 13)], 2);
        assert!(!state.try_rotate());
    }

    #[test]
    fn test_rotate_o_is_noop() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::O, 1);
        let before = state.active().unwrap().cells.clone();
        assert!(state.try_rotate());
        assert_eq!(state.active().unwrap().cells, before);
    }

    #[test]
    fn test_rotation_collision_bounds() {
        let state = GameState::new(1);
        assert_eq!(state.check_rotation_collision(&[Pos::new(5, -1)]), Collision::Blocked);
        assert_eq!(
            state.check_rotation_collision(&[Pos::new(5, GRID_WIDTH - 1)]),
            Collision::Blocked
        );
        assert_eq!(state.check_rotation_collision(&[Pos::new(0, 5)]), Collision::Blocked);
        assert_eq!(
            state.check_rotation_collision(&[Pos::new(GRID_HEIGHT, 5)]),
            Collision::Blocked
        );
        assert_eq!(
            state.check_rotation_collision(&[Pos::new(GRID_HEIGHT - 1, 0)]),
            Collision::Clear
        );
    }

    #[test]
    fn test_spawn_color_differs_from_last_settled() {
        let mut state = GameState::new(99);
        for color in 1..=COLOR_COUNT as u8 {
            state.grid_mut().clear();
            state.grid_mut().settle(&[Pos::new(20, 1)], color);
            for _ in 0..20 {
                let c = state.pick_color();
                assert_ne!(c, color);
            }
        }
    }

    #[test]
    fn test_overflow_ends_game_without_new_piece() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::T, 1);
        // Settle the T where it spawned: its top cell is in row 1.
        assert!(!state.spawn_piece());
        assert!(state.game_over());
        assert!(state.active().is_none());

        let blocks = state.grid().blocks().len();
        state.update(POLL_TIMEOUT_MS);
        assert!(state.active().is_none());
        assert_eq!(state.grid().blocks().len(), blocks);
    }

    #[test]
    fn test_spawn_queues_full_row() {
        let mut state = GameState::new(1);
        fill_row(&mut state, 25, 1);
        state.spawn_piece();
        assert_eq!(state.grid().full_rows(), &[25]);
    }

    #[test]
    fn test_clear_animation_scores() {
        let mut state = GameState::new(1);
        fill_row(&mut state, 25, 1);
        state.grid_mut().settle(&[Pos::new(24, 5)], 2);
        state.spawn_piece();

        let mut ticks = 0;
        while state.advance_clear().is_none() {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert_eq!(state.score(), 1);
        let blocks: Vec<Pos> = state.grid().blocks().iter().map(|b| b.pos).collect();
        assert_eq!(blocks, vec![Pos::new(25, 5)]);
    }

    fn assert_no_overlap(state: &GameState) {
        let blocks = state.grid().blocks();
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                assert_ne!(a.pos, b.pos, "two settled blocks share a cell");
            }
        }
        if let Some(active) = state.active() {
            for cell in &active.cells {
                assert!(!state.grid().is_occupied(*cell), "active overlaps {cell:?}");
            }
        }
    }

    #[test]
    fn test_collapse_carries_active_piece_under_overhang() {
        let mut state = GameState::new(1);
        fill_row(&mut state, 20, 1);
        state.grid_mut().settle(&[Pos::new(10, 5)], 2);
        state.spawn_piece_of(ShapeKind::I, 3);
        assert_eq!(state.grid().full_rows(), &[20]);

        // Tuck the bar under the overhang at (10, 5).
        for _ in 0..10 {
            assert!(state.try_move(1, 0));
        }
        for _ in 0..3 {
            assert!(state.try_move(0, -CELL_SPAN));
        }
        assert_eq!(state.active().unwrap().cells[0], Pos::new(11, 5));

        let mut ticks = 0;
        while state.advance_clear().is_none() {
            ticks += 1;
            assert!(ticks < 20);
        }

        // The overhang and the bar both moved down one row.
        assert!(state.grid().is_occupied(Pos::new(11, 5)));
        assert_eq!(state.active().unwrap().cells[0], Pos::new(12, 5));
        assert_no_overlap(&state);

        state.hard_drop();
        assert_no_overlap(&state);
        assert_eq!(state.grid().blocks().len(), 5);
    }

    #[test]
    fn test_clearing_row_is_solid_for_active_piece() {
        let mut state = GameState::new(1);
        fill_row(&mut state, 25, 1);
        state.grid_mut().settle(&[Pos::new(24, 5)], 2);
        state.spawn_piece_of(ShapeKind::I, 3);

        // One slide step opens the odd columns of row 25.
        assert!(state.advance_clear().is_none());
        assert!(!state.grid().is_occupied(Pos::new(25, 11)));
        assert!(state.grid().is_blocked(Pos::new(25, 11)));

        state.hard_drop();
        let bar: Vec<Pos> = state
            .grid()
            .blocks()
            .iter()
            .filter(|b| b.color == 3)
            .map(|b| b.pos)
            .collect();
        assert!(bar.iter().all(|p| p.row == 24), "{bar:?}");

        while state.grid().is_clearing() {
            state.advance_clear();
        }
        assert_eq!(state.score(), 1);
        assert!(state.grid().is_occupied(Pos::new(25, 5)));
        assert!(state.grid().is_occupied(Pos::new(25, 11)));
        assert_no_overlap(&state);
    }

    #[test]
    fn test_spawn_into_stack_ends_game() {
        let mut state = GameState::new(1);
        state.grid_mut().settle(&[Pos::new(2, 13)], 2);

        assert!(!state.spawn_piece_of(ShapeKind::T, 1));
        assert!(state.game_over());
        assert!(state.active().is_none());
        assert_no_overlap(&state);
    }

    #[test]
    fn test_ghost_stops_above_clearing_row() {
        let mut state = GameState::new(1);
        fill_row(&mut state, 25, 1);
        state.spawn_piece_of(ShapeKind::I, 3);
        state.advance_clear();

        let ghost = state.ghost_cells().unwrap();
        assert!(ghost.iter().all(|c| c.row == 24));
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut state = GameState::new(1);
        state.update(POLL_TIMEOUT_MS);
        let start = state.active().unwrap().cells[0];

        let ticks = BASE_GRAVITY_MS / POLL_TIMEOUT_MS;
        // The first update already counted one tick.
        for _ in 0..ticks - 2 {
            state.update(POLL_TIMEOUT_MS);
        }
        assert_eq!(state.active().unwrap().cells[0], start);
        state.update(POLL_TIMEOUT_MS);
        assert_eq!(state.active().unwrap().cells[0], start.offset(1, 0));
        assert_eq!(state.tick(), 0);
    }

    #[test]
    fn test_pause_blocks_gravity_and_moves() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::T, 2);
        let before = state.active().unwrap().cells.clone();

        assert!(state.apply_action(GameAction::TogglePause));
        assert!(state.paused());
        for _ in 0..100 {
            state.update(POLL_TIMEOUT_MS);
        }
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active().unwrap().cells, before);
        assert_eq!(state.panel_text(), "- game paused - ");

        assert!(state.apply_action(GameAction::TogglePause));
        assert_eq!(state.phase(), Phase::Running);
        assert!(state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_confirm_and_decline_ignored_while_running() {
        let mut state = GameState::new(1);
        state.update(POLL_TIMEOUT_MS);
        assert!(!state.apply_action(GameAction::Confirm));
        assert!(!state.apply_action(GameAction::Decline));
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = GameState::new(1);
        fill_row(&mut state, 25, 1);
        state.grid_mut().settle(&[Pos::new(1, 13)], 2);
        state.spawn_piece();
        assert!(state.game_over());

        assert!(state.apply_action(GameAction::Confirm));
        assert_eq!(state.phase(), Phase::Running);
        assert!(state.grid().blocks().is_empty());
        assert!(state.grid().full_rows().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.tick(), 0);

        state.update(POLL_TIMEOUT_MS);
        assert!(state.active().is_some());
    }

    #[test]
    fn test_decline_after_game_over_quits() {
        let mut state = GameState::new(1);
        state.grid_mut().settle(&[Pos::new(1, 13)], 2);
        state.spawn_piece();
        assert!(state.game_over());
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(state.apply_action(GameAction::Decline));
        assert!(state.quit());
    }

    #[test]
    fn test_ghost_sits_on_floor() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::I, 1);
        let ghost = state.ghost_cells().unwrap();
        assert!(ghost.iter().all(|c| c.row == GRID_HEIGHT - 1));

        state.apply_action(GameAction::ToggleGhost);
        assert!(state.snapshot().ghost.is_none());
    }

    #[test]
    fn test_ghost_hidden_near_stack() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::I, 1);
        state.grid_mut().settle(&[Pos::new(8, 13)], 2);
        assert!(state.ghost_cells().is_none());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(1);
        state.spawn_piece_of(ShapeKind::L, 4);
        state.grid_mut().settle(&[Pos::new(20, 3)], 1);

        let snap = state.snapshot();
        assert_eq!(snap.blocks, vec![(Pos::new(20, 3), 1)]);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, ShapeKind::L);
        assert_eq!(active.color, 4);
        assert_eq!(snap.panel_text, " score:0  level:1");
        assert!(!snap.game_over);
    }
}
