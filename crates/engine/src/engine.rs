//! Game engine - the command-driven state machine
//!
//! The host calls [`GameEngine::tick`] at a fixed rate and forwards input through
//! [`GameEngine::handle_command`]. Both entry points run to completion on the
//! caller's thread, so no two mutations ever overlap. Renderers read
//! [`GameEngine::snapshot`] between calls.

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::core::{
    collision, create_piece_by_tag, lock_piece, Board, ClearedRows, GameSnapshot, HoldOutcome,
    LockOutcome, PieceSnapshot,
};
use crate::error::Result;
use crate::state::GameState;
use crate::types::{Command, GamePhase, TetrominoKind, SHADOW_ALPHA};

/// Result of the most recent lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub cleared_rows: ClearedRows,
    pub game_over: bool,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    state: GameState,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameEngine {
    /// Create an engine; the first piece spawns on [`start`](Self::start) or the first tick
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Default 10x20 game with a fixed piece sequence
    pub fn with_seed(seed: u64) -> Self {
        // The default board always passes validation
        Self::from_valid(EngineConfig::default().with_seed(seed))
    }

    fn from_valid(config: EngineConfig) -> Self {
        Self {
            board: Board::new(config.cols, config.rows),
            state: GameState::new(&config),
            last_event: None,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Spawn the first piece now instead of waiting for a tick
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Spawning && self.state.current.is_none() {
            self.spawn_current();
        }
    }

    /// Change fall speed, clamped into `[0, drop_cycle]`
    pub fn set_drop_speed(&mut self, speed: u32) {
        self.state.gravity.set_drop_speed(speed);
        debug!(speed = self.state.gravity.drop_speed(), "drop speed changed");
    }

    /// Script the kind of an upcoming spawn
    pub fn push_preset(&mut self, kind: TetrominoKind) {
        self.state.queue.push_preset(kind);
    }

    /// Script an upcoming spawn by type tag such as `"L"`
    pub fn queue_piece(&mut self, tag: &str) -> Result<()> {
        let piece = create_piece_by_tag(tag)?;
        self.push_preset(piece.kind);
        Ok(())
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current: self.state.current.as_ref().map(PieceSnapshot::from),
            shadow: self.state.shadow.as_ref().map(PieceSnapshot::from),
            next: self.state.queue.next().map(PieceSnapshot::from),
            hold: self.state.queue.hold_piece().map(PieceSnapshot::from),
            phase: self.state.phase,
            held_used: self.state.queue.held_used(),
            drop_speed: self.state.gravity.drop_speed(),
        }
    }

    /// Main game tick - spawn if needed, apply gravity, lock on contact.
    ///
    /// Suppressed while paused or after game over. Returns true if state changed.
    pub fn tick(&mut self) -> bool {
        if matches!(self.state.phase, GamePhase::Paused | GamePhase::GameOver) {
            return false;
        }

        let mut changed = false;

        if self.state.current.is_none() {
            self.spawn_current();
            changed = true;
        }

        if self.state.gravity.advance() {
            if let Some(current) = self.state.current.as_mut() {
                current.move_by(0, 1);
                changed = true;
            }
        }

        let grounded = self
            .state
            .current
            .as_ref()
            .is_some_and(|p| collision::is_collided(&self.board, p));
        if grounded {
            self.lock_current();
        }

        changed
    }

    /// Apply an input command. Returns true if it changed anything.
    pub fn handle_command(&mut self, command: Command) -> bool {
        trace!(command = command.as_str(), phase = self.state.phase.as_str(), "command");
        match command {
            Command::Pause => self.toggle_pause(),
            Command::Restart => {
                self.restart();
                true
            }
            _ if self.state.phase != GamePhase::Falling => false,
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.try_move(0, 1),
            Command::RotateClockwise => self.try_rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Hold => self.hold(),
        }
    }

    /// Reset board and state; the next tick spawns a fresh piece
    pub fn restart(&mut self) {
        self.board.clear();
        self.state.reset(&self.config);
        self.last_event = None;
        info!("game restarted");
    }

    fn spawn_current(&mut self) {
        let piece = self.state.queue.activate(&self.board);
        self.state.current = Some(piece);
        self.state.phase = GamePhase::Falling;
        self.refresh_shadow();
    }

    /// Re-project the shadow under the current piece
    fn refresh_shadow(&mut self) {
        self.state.shadow = self.state.current.as_ref().map(|current| {
            let mut shadow = current.translucent(SHADOW_ALPHA);
            collision::drop_to_rest(&self.board, &mut shadow);
            shadow
        });
    }

    fn try_move(&mut self, d_col: i32, d_row: i32) -> bool {
        let Some(current) = self.state.current.as_mut() else {
            return false;
        };
        if !collision::try_move(&self.board, current, d_col, d_row) {
            return false;
        }
        self.refresh_shadow();
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(current) = self.state.current.as_mut() else {
            return false;
        };
        if !collision::try_rotate(&self.board, current) {
            return false;
        }
        self.refresh_shadow();
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(current) = self.state.current.as_mut() else {
            return false;
        };
        collision::drop_to_rest(&self.board, current);
        self.lock_current();
        true
    }

    fn hold(&mut self) -> bool {
        match self.state.queue.hold(&self.board, &mut self.state.current) {
            HoldOutcome::Stored => {
                self.state.shadow = None;
                self.state.phase = GamePhase::Spawning;
                true
            }
            HoldOutcome::Swapped => {
                self.refresh_shadow();
                true
            }
            HoldOutcome::Ignored | HoldOutcome::Rejected => false,
        }
    }

    fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::GameOver => false,
            GamePhase::Paused => {
                self.state.phase = self.state.resume_phase;
                info!("game resumed");
                true
            }
            phase => {
                self.state.resume_phase = phase;
                self.state.phase = GamePhase::Paused;
                info!("game paused");
                true
            }
        }
    }

    /// Commit the current piece and move on to the next spawn or game over
    fn lock_current(&mut self) {
        let Some(mut piece) = self.state.current.take() else {
            return;
        };
        self.state.shadow = None;

        match lock_piece(&mut self.board, &mut piece) {
            LockOutcome::ToppedOut => {
                info!(kind = ?piece.kind, "game over");
                // Keep the frozen piece visible
                self.state.current = Some(piece);
                self.state.phase = GamePhase::GameOver;
                self.last_event = Some(LockEvent {
                    cleared_rows: ClearedRows::new(),
                    game_over: true,
                });
            }
            LockOutcome::Locked { cleared_rows } => {
                if !cleared_rows.is_empty() {
                    debug!(rows = ?cleared_rows.as_slice(), "lines cleared");
                }
                self.state.queue.end_turn();
                self.state.phase = GamePhase::Spawning;
                self.last_event = Some(LockEvent {
                    cleared_rows,
                    game_over: false,
                });
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Piece;
    use crate::error::EngineError;
    use crate::types::Color;

    fn engine_with(kinds: &[TetrominoKind]) -> GameEngine {
        let mut engine = GameEngine::with_seed(12345);
        for &kind in kinds {
            engine.push_preset(kind);
        }
        engine
    }

    fn small_engine(kinds: &[TetrominoKind]) -> GameEngine {
        let config = EngineConfig::default().with_board(4, 4).with_seed(7);
        let mut engine = GameEngine::new(config).unwrap();
        for &kind in kinds {
            engine.push_preset(kind);
        }
        engine
    }

    fn current(engine: &GameEngine) -> &Piece {
        engine.state.current().expect("expected current piece")
    }

    fn board_ascii(board: &Board) -> Vec<String> {
        (0..board.rows() as i32)
            .map(|r| {
                board
                    .row_cells(r)
                    .unwrap()
                    .iter()
                    .map(|c| if c.occupied { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_with_seed_matches_validated_new() {
        let mut seeded = GameEngine::with_seed(9);
        let mut built = GameEngine::new(EngineConfig::default().with_seed(9)).unwrap();
        assert_eq!(seeded.config(), built.config());
        for _ in 0..5 {
            seeded.handle_command(Command::HardDrop);
            seeded.tick();
            built.handle_command(Command::HardDrop);
            built.tick();
        }
        assert_eq!(seeded.snapshot(), built.snapshot());
    }

    #[test]
    fn test_new_engine() {
        let engine = GameEngine::with_seed(1);

        assert_eq!(engine.phase(), GamePhase::Spawning);
        assert!(engine.state.current().is_none());
        assert!(engine.state.next().is_none());
        assert!(engine.state.hold().is_none());
        assert!(!engine.state.held_used_this_turn());
        assert_eq!(engine.state.drop_cycle_length(), 1000);
        assert_eq!(engine.state.drop_speed(), 50);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GameEngine::new(EngineConfig::default().with_board(2, 2)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_start_spawns_first_piece() {
        let mut engine = engine_with(&[TetrominoKind::T, TetrominoKind::S]);
        engine.start();

        assert_eq!(engine.phase(), GamePhase::Falling);
        assert_eq!(current(&engine).kind, TetrominoKind::T);
        assert_eq!(engine.state.next().map(|p| p.kind), Some(TetrominoKind::S));
        assert!(engine.state.shadow().is_some());
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        assert!(engine.tick());
        assert_eq!(engine.phase(), GamePhase::Falling);
        assert_eq!(current(&engine).kind, TetrominoKind::O);
    }

    #[test]
    fn test_o_spawn_is_centered() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        engine.start();

        let piece = current(&engine);
        assert!(piece.col == 4 || piece.col == 5);
        assert!(!collision::is_collided(engine.board(), piece));
    }

    #[test]
    fn test_gravity_moves_piece_every_cycle() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        engine.start();
        let start_row = current(&engine).row;

        for _ in 0..19 {
            engine.tick();
        }
        assert_eq!(current(&engine).row, start_row);

        engine.tick();
        assert_eq!(current(&engine).row, start_row + 1);
        assert_eq!(engine.state.drop_accumulator(), 0);
    }

    #[test]
    fn test_gravity_locks_on_floor() {
        let mut engine = engine_with(&[TetrominoKind::O, TetrominoKind::T]);
        engine.set_drop_speed(1000);
        engine.start();

        // O spawns at row -2 and rests at row 18 after 20 steps; the 21st collides
        for _ in 0..21 {
            engine.tick();
        }

        assert_eq!(engine.phase(), GamePhase::Spawning);
        assert!(engine.board().is_occupied(4, 19));
        assert!(engine.board().is_occupied(5, 18));
        let event = engine.take_last_event().unwrap();
        assert!(!event.game_over);
        assert_eq!(event.lines_cleared(), 0);
    }

    #[test]
    fn test_ticks_suppressed_while_paused() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        engine.set_drop_speed(1000);
        engine.start();
        let row = current(&engine).row;

        assert!(engine.handle_command(Command::Pause));
        assert_eq!(engine.phase(), GamePhase::Paused);
        for _ in 0..50 {
            assert!(!engine.tick());
        }
        assert_eq!(current(&engine).row, row);

        assert!(!engine.handle_command(Command::MoveLeft));

        assert!(engine.handle_command(Command::Pause));
        assert_eq!(engine.phase(), GamePhase::Falling);
        engine.tick();
        assert_eq!(current(&engine).row, row + 1);
    }

    #[test]
    fn test_pause_from_spawning_resumes_to_spawning() {
        let mut engine = GameEngine::with_seed(3);
        engine.handle_command(Command::Pause);
        engine.handle_command(Command::Pause);
        assert_eq!(engine.phase(), GamePhase::Spawning);
    }

    #[test]
    fn test_commands_ignored_without_current() {
        let mut engine = GameEngine::with_seed(3);
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::RotateClockwise,
            Command::HardDrop,
            Command::Hold,
        ] {
            assert!(!engine.handle_command(cmd), "{:?}", cmd);
        }
    }

    #[test]
    fn test_moves_update_shadow() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        engine.start();

        assert!(engine.handle_command(Command::MoveLeft));
        let piece = current(&engine).clone();
        let shadow = engine.state.shadow().unwrap();
        assert_eq!(shadow.col, piece.col);
        assert_eq!(shadow.shape, piece.shape);
        assert_eq!(shadow.color, piece.color.with_alpha(SHADOW_ALPHA));
        assert_eq!(shadow.cells().map(|(_, r)| r).max(), Some(19));
    }

    #[test]
    fn test_shadow_lands_on_stack() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        engine.board_mut().set_cell(4, 10, 1, Color::RED);
        engine.start();

        let shadow = engine.state.shadow().unwrap();
        assert_eq!(shadow.row, 8);
    }

    #[test]
    fn test_soft_drop_moves_one_row() {
        let mut engine = engine_with(&[TetrominoKind::T]);
        engine.start();
        let row = current(&engine).row;

        assert!(engine.handle_command(Command::SoftDrop));
        assert_eq!(current(&engine).row, row + 1);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        engine.start();

        let mut moved = 0;
        for _ in 0..10 {
            if engine.handle_command(Command::MoveLeft) {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(current(&engine).col, 0);
    }

    #[test]
    fn test_rotate_against_right_wall_kicks_left() {
        let mut engine = engine_with(&[TetrominoKind::J]);
        engine.start();
        while engine.handle_command(Command::MoveRight) {}
        let col = current(&engine).col;
        assert_eq!(col, 8);

        assert!(engine.handle_command(Command::RotateClockwise));

        assert_eq!(current(&engine).col, col - 1);
        assert!(collision::is_in_bounds(engine.board(), current(&engine)));
    }

    #[test]
    fn test_hard_drop_on_empty_board() {
        let mut engine = engine_with(&[TetrominoKind::I, TetrominoKind::T]);
        engine.start();

        assert!(engine.handle_command(Command::HardDrop));

        let lowest = engine
            .board()
            .cells()
            .filter(|(_, _, c)| c.occupied)
            .map(|(_, r, _)| r)
            .max();
        assert_eq!(lowest, Some(19));
        assert_eq!(engine.board().occupied_count(), 4);
        assert!(engine.state.current().is_none());
        assert!(engine.state.shadow().is_none());
        assert_eq!(engine.phase(), GamePhase::Spawning);
    }

    #[test]
    fn test_next_piece_becomes_current_after_lock() {
        let mut engine = engine_with(&[TetrominoKind::T, TetrominoKind::S, TetrominoKind::Z]);
        engine.start();
        engine.handle_command(Command::HardDrop);

        engine.tick();

        assert_eq!(current(&engine).kind, TetrominoKind::S);
        assert_eq!(engine.state.next().map(|p| p.kind), Some(TetrominoKind::Z));
    }

    #[test]
    fn test_hold_into_empty_slot_respawns() {
        let mut engine = engine_with(&[TetrominoKind::T, TetrominoKind::S]);
        engine.start();

        assert!(engine.handle_command(Command::Hold));
        assert_eq!(engine.phase(), GamePhase::Spawning);
        assert!(engine.state.current().is_none());
        assert_eq!(engine.state.hold().map(|p| p.kind), Some(TetrominoKind::T));

        engine.tick();
        assert_eq!(current(&engine).kind, TetrominoKind::S);
    }

    #[test]
    fn test_hold_twice_without_lock_is_noop() {
        let mut engine = engine_with(&[TetrominoKind::T, TetrominoKind::S, TetrominoKind::Z]);
        engine.start();
        assert!(engine.handle_command(Command::Hold));
        engine.tick();

        assert!(!engine.handle_command(Command::Hold));
        assert!(engine.state.held_used_this_turn());
        assert_eq!(engine.state.hold().map(|p| p.kind), Some(TetrominoKind::T));
        assert_eq!(current(&engine).kind, TetrominoKind::S);
    }

    #[test]
    fn test_hold_available_again_after_lock() {
        let mut engine = engine_with(&[TetrominoKind::T, TetrominoKind::S, TetrominoKind::Z]);
        engine.start();
        engine.handle_command(Command::Hold);
        engine.tick();
        engine.handle_command(Command::HardDrop);
        assert!(!engine.state.held_used_this_turn());
        engine.tick();

        assert!(engine.handle_command(Command::Hold));
        assert_eq!(current(&engine).kind, TetrominoKind::T);
        assert_eq!(engine.state.hold().map(|p| p.kind), Some(TetrominoKind::Z));
        assert!(engine.state.shadow().is_some());
    }

    #[test]
    fn test_hold_swap_kicks_wide_piece_into_small_board() {
        let mut engine = small_engine(&[TetrominoKind::I, TetrominoKind::O]);
        engine.start();
        // Horizontal I spans the whole 4-wide board
        engine.handle_command(Command::MoveLeft);
        assert!(engine.handle_command(Command::RotateClockwise));
        engine.handle_command(Command::Hold);
        engine.tick();
        engine.handle_command(Command::HardDrop);
        engine.tick();

        assert!(engine.handle_command(Command::Hold));

        let piece = current(&engine);
        assert_eq!(piece.kind, TetrominoKind::I);
        assert_eq!(piece.col, 0);
        assert!(collision::is_valid(engine.board(), piece));
    }

    #[test]
    fn test_line_clear_on_small_board() {
        let mut engine = small_engine(&[TetrominoKind::I, TetrominoKind::O]);
        for col in 0..3 {
            engine.board_mut().set_cell(col, 3, 1, Color::RED);
        }
        engine.board_mut().set_cell(0, 2, 1, Color::RED);
        engine.start();

        // I fills bitmap column 1; spawn col 1 puts it in board column 2
        assert!(engine.handle_command(Command::MoveRight));
        assert!(engine.handle_command(Command::HardDrop));

        assert_eq!(
            board_ascii(engine.board()),
            vec!["....", "...#", "...#", "#..#"]
        );
        assert!(!engine.board().is_row_full(3));
        let event = engine.take_last_event().unwrap();
        assert_eq!(event.cleared_rows.as_slice(), &[3]);
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_game_over_when_resting_above_board() {
        let mut engine = engine_with(&[TetrominoKind::O]);
        for row in 0..20 {
            for col in 1..10 {
                engine.board_mut().set_cell(col, row, 1, Color::RED);
            }
        }
        engine.start();

        assert!(engine.handle_command(Command::HardDrop));

        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(engine.take_last_event().unwrap().game_over);
        assert_eq!(engine.board().cell_at(5, 5).unwrap().color, Color::FROZEN);
        let piece = current(&engine);
        assert_eq!(piece.color, Color::FROZEN);
        assert!(engine.state.shadow().is_none());

        // Terminal until restart
        assert!(!engine.tick());
        assert!(!engine.handle_command(Command::Pause));
        assert!(!engine.handle_command(Command::MoveLeft));
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut engine = engine_with(&[TetrominoKind::T, TetrominoKind::S]);
        engine.start();
        engine.set_drop_speed(700);
        engine.handle_command(Command::Hold);
        engine.tick();
        engine.handle_command(Command::HardDrop);

        assert!(engine.handle_command(Command::Restart));

        assert_eq!(engine.phase(), GamePhase::Spawning);
        assert_eq!(engine.board().occupied_count(), 0);
        assert!(engine.state.current().is_none());
        assert!(engine.state.next().is_none());
        assert!(engine.state.hold().is_none());
        assert!(!engine.state.held_used_this_turn());
        assert_eq!(engine.state.drop_speed(), 50);
        assert_eq!(engine.state.drop_accumulator(), 0);
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_set_drop_speed_clamps() {
        let mut engine = GameEngine::with_seed(1);
        engine.set_drop_speed(5000);
        assert_eq!(engine.state.drop_speed(), 1000);
        engine.set_drop_speed(0);
        assert_eq!(engine.state.drop_speed(), 0);
    }

    #[test]
    fn test_queue_piece_by_tag() {
        let mut engine = GameEngine::with_seed(1);
        engine.queue_piece("z").unwrap();
        engine.start();
        assert_eq!(current(&engine).kind, TetrominoKind::Z);

        let err = engine.queue_piece("q").unwrap_err();
        assert!(matches!(err, EngineError::Core(_)));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = engine_with(&[TetrominoKind::L, TetrominoKind::J]);
        engine.start();

        let snap = engine.snapshot();
        assert_eq!(snap.phase, GamePhase::Falling);
        assert_eq!(snap.current.map(|p| p.kind), Some(TetrominoKind::L));
        assert_eq!(snap.next.map(|p| p.kind), Some(TetrominoKind::J));
        assert!(snap.hold.is_none());
        assert!(snap.shadow.is_some());
        assert_eq!(snap.drop_speed, 50);
    }
}
