//! Game engine - owns the board and game state and drives them from ticks and commands
//!
//! ```
//! use blockfall_engine::{EngineConfig, GameEngine};
//! use blockfall_engine::types::{Command, GamePhase, TetrominoKind};
//!
//! let mut engine = GameEngine::new(EngineConfig::default().with_seed(7)).unwrap();
//! engine.push_preset(TetrominoKind::O);
//! engine.start();
//! assert_eq!(engine.phase(), GamePhase::Falling);
//!
//! engine.handle_command(Command::HardDrop);
//! assert_eq!(engine.board().occupied_count(), 4);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::{EngineConfig, MAX_DROP_CYCLE};
pub use engine::{GameEngine, LockEvent};
pub use error::{EngineError, Result};
pub use state::GameState;
