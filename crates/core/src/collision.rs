//! Collision resolver - bounds and overlap checks between a piece and the board,
//! plus the move/rotate primitives built on them.
//!
//! Rows above the board (negative) are never checked against board content, so a
//! piece spawning partly above row 0 is legal. Only the floor and the side walls
//! constrain a piece.

use crate::board::Board;
use crate::piece::Piece;

/// Wall-kick offsets (d_col, d_row) tried in order after a blocked rotation
pub const KICK_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Every filled cell has a column in `[0, cols)` and a row below `rows`
pub fn is_in_bounds(board: &Board, piece: &Piece) -> bool {
    let cols = board.cols() as i32;
    let rows = board.rows() as i32;
    piece
        .cells()
        .all(|(col, row)| col >= 0 && col < cols && row < rows)
}

/// Any filled cell is at or past the floor, or lands on a settled block
pub fn is_collided(board: &Board, piece: &Piece) -> bool {
    let rows = board.rows() as i32;
    piece
        .cells()
        .any(|(col, row)| row >= rows || board.is_occupied(col, row))
}

/// In bounds and not overlapping anything
pub fn is_valid(board: &Board, piece: &Piece) -> bool {
    is_in_bounds(board, piece) && !is_collided(board, piece)
}

/// Apply a delta; revert and return false if the result is invalid
pub fn try_move(board: &Board, piece: &mut Piece, d_col: i32, d_row: i32) -> bool {
    piece.move_by(d_col, d_row);
    if is_valid(board, piece) {
        return true;
    }
    piece.move_by(-d_col, -d_row);
    false
}

/// Try each kick offset in order, keeping the first translation that is valid
pub fn try_kick(board: &Board, piece: &mut Piece) -> bool {
    KICK_OFFSETS
        .iter()
        .any(|&(d_col, d_row)| try_move(board, piece, d_col, d_row))
}

/// Rotate clockwise with wall-kick fallback.
///
/// On failure the piece is left exactly as it was (shape and position).
pub fn try_rotate(board: &Board, piece: &mut Piece) -> bool {
    let previous = piece.shape;
    piece.rotate_cw();

    if is_valid(board, piece) || try_kick(board, piece) {
        return true;
    }

    piece.shape = previous;
    false
}

/// Move down until the next step would collide. Returns rows travelled.
pub fn drop_to_rest(board: &Board, piece: &mut Piece) -> i32 {
    let mut distance = 0;
    while !is_collided(board, piece) {
        piece.move_by(0, 1);
        distance += 1;
    }
    piece.move_by(0, -1);
    distance - 1
}
