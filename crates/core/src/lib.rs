//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game. It has no dependencies on
//! terminals, timers or input devices: the engine drives it and hosts only read
//! snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid of cells, row clearing
//! - [`piece`]: square shape bitmaps, clockwise rotation
//! - [`factory`]: shape and color tables per tetromino kind
//! - [`collision`]: bounds/overlap checks, moves, rotation with wall kicks
//! - [`lock`]: committing a resting piece and clearing completed rows
//! - [`rng`]: uniform random piece selection with optional scripted kinds
//! - [`spawn`]: next/hold slots and spawn placement
//! - [`gravity`]: tick accumulator that schedules downward steps
//! - [`snapshot`]: read-only views for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{collision, create_piece, Board, SpawnQueue};
//! use blockfall_core::types::TetrominoKind;
//!
//! let board = Board::new(10, 20);
//! let mut piece = create_piece(TetrominoKind::T);
//! SpawnQueue::place_at_spawn(&board, &mut piece);
//!
//! assert!(collision::try_move(&board, &mut piece, 1, 0));
//! assert!(collision::try_rotate(&board, &mut piece));
//! ```

pub mod board;
pub mod collision;
pub mod error;
pub mod factory;
pub mod gravity;
pub mod lock;
pub mod piece;
pub mod rng;
pub mod snapshot;
pub mod spawn;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use error::{CoreError, Result};
pub use factory::{color_of, create_piece, create_piece_by_tag, shape_of};
pub use gravity::GravityClock;
pub use lock::{lock_piece, ClearedRows, LockOutcome};
pub use piece::{Piece, Shape};
pub use rng::PieceRandomizer;
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use spawn::{HoldOutcome, SpawnQueue};
