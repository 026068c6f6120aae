//! Error types for core game logic.

use thiserror::Error;

/// Errors raised by core operations.
///
/// Gameplay failures (blocked moves, rejected rotations) are not errors; they are
/// reported as `false` and leave state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A piece was requested by a tag outside the seven tetromino kinds.
    #[error("invalid piece type: {0:?}")]
    InvalidPieceType(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
