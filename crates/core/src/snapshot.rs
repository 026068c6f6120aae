use serde::Serialize;

use crate::board::Board;
use crate::piece::{Piece, Shape};
use crate::types::{Color, GamePhase, TetrominoKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieceSnapshot {
    pub kind: TetrominoKind,
    pub shape: Shape,
    pub col: i32,
    pub row: i32,
    pub color: Color,
    pub border: Color,
}

impl PieceSnapshot {
    /// Absolute (col, row) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.cells_at(self.col, self.row)
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            col: value.col,
            row: value.row,
            color: value.color,
            border: value.border,
        }
    }
}

/// Read-only copy of everything a renderer needs, taken between ticks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current: Option<PieceSnapshot>,
    pub shadow: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub hold: Option<PieceSnapshot>,
    pub phase: GamePhase,
    pub held_used: bool,
    pub drop_speed: u32,
}
