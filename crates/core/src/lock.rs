//! Lock & line clear - commits a resting piece into the board and removes
//! completed rows.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::collision::is_collided;
use crate::piece::{Piece, MAX_SHAPE_SIZE};

/// Rows removed by one lock, top to bottom (row indices before removal)
pub type ClearedRows = ArrayVec<i32, MAX_SHAPE_SIZE>;

/// Result of committing a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// Piece written into the board
    Locked { cleared_rows: ClearedRows },
    /// Piece came to rest with a cell above row 0; board and piece are frozen
    ToppedOut,
}

impl LockOutcome {
    #[cfg(test)]
    pub(crate) fn lines_cleared(&self) -> usize {
        match self {
            LockOutcome::Locked { cleared_rows } => cleared_rows.len(),
            LockOutcome::ToppedOut => 0,
        }
    }
}

/// Commit `piece` into `board`.
///
/// The piece is first stepped up until it no longer collides, undoing the step
/// that caused the overlap. A resting piece with any cell above the board tops
/// out instead of locking.
pub fn lock_piece(board: &mut Board, piece: &mut Piece) -> LockOutcome {
    while is_collided(board, piece) {
        piece.move_by(0, -1);
    }

    if piece.cells().any(|(_, row)| row < 0) {
        debug!(kind = ?piece.kind, col = piece.col, row = piece.row, "piece topped out");
        board.freeze();
        piece.freeze();
        return LockOutcome::ToppedOut;
    }

    for (col, row) in piece.cells() {
        board.set_cell(col, row, 1, piece.color);
    }

    let touched: ArrayVec<i32, MAX_SHAPE_SIZE> = piece.filled_rows().collect();
    let cleared_rows = clear_full_rows(board, &touched);

    debug!(
        kind = ?piece.kind,
        col = piece.col,
        row = piece.row,
        rows_cleared = cleared_rows.len(),
        "piece locked"
    );

    LockOutcome::Locked { cleared_rows }
}

/// Clear every full row among `rows`.
///
/// Rows are handled top to bottom: clearing a row only shifts rows above it, so
/// the lower candidates keep their index and each full row is removed once.
pub fn clear_full_rows(board: &mut Board, rows: &[i32]) -> ClearedRows {
    let mut candidates: ArrayVec<i32, MAX_SHAPE_SIZE> = rows.iter().copied().collect();
    candidates.sort_unstable();

    let mut cleared = ClearedRows::new();
    for row in candidates {
        if board.is_row_full(row) {
            board.clear_row(row);
            cleared.push(row);
        }
    }
    cleared
}
