//! Mutable game state owned by the engine.

use crate::config::EngineConfig;
use crate::core::{GravityClock, Piece, SpawnQueue};
use crate::types::GamePhase;

/// Everything that changes during a game, apart from the board.
///
/// Reset wholesale on restart. Only [`crate::GameEngine`] mutates it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) current: Option<Piece>,
    pub(crate) shadow: Option<Piece>,
    pub(crate) queue: SpawnQueue,
    pub(crate) gravity: GravityClock,
    pub(crate) phase: GamePhase,
    /// Phase to return to when a pause ends
    pub(crate) resume_phase: GamePhase,
}

impl GameState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            current: None,
            shadow: None,
            queue: SpawnQueue::new(config.seed),
            gravity: GravityClock::new(config.drop_cycle, config.drop_speed),
            phase: GamePhase::Spawning,
            resume_phase: GamePhase::Spawning,
        }
    }

    /// Back to a fresh game. The piece randomizer keeps its stream.
    pub(crate) fn reset(&mut self, config: &EngineConfig) {
        self.current = None;
        self.shadow = None;
        self.queue.reset();
        self.gravity = GravityClock::new(config.drop_cycle, config.drop_speed);
        self.phase = GamePhase::Spawning;
        self.resume_phase = GamePhase::Spawning;
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn shadow(&self) -> Option<&Piece> {
        self.shadow.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.queue.next()
    }

    pub fn hold(&self) -> Option<&Piece> {
        self.queue.hold_piece()
    }

    pub fn held_used_this_turn(&self) -> bool {
        self.queue.held_used()
    }

    pub fn drop_accumulator(&self) -> u32 {
        self.gravity.accumulator()
    }

    pub fn drop_cycle_length(&self) -> u32 {
        self.gravity.drop_cycle()
    }

    pub fn drop_speed(&self) -> u32 {
        self.gravity.drop_speed()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }
}
