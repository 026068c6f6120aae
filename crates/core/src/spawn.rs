//! Spawn queue - the next and hold slots and spawn placement.
//!
//! New pieces come from the [`PieceRandomizer`]; one piece is always pre-rolled
//! into the `next` slot once the game has spawned its first piece. The hold slot
//! can be used once per lock cycle.

use tracing::debug;

use crate::board::Board;
use crate::collision::{is_valid, try_kick};
use crate::factory::create_piece;
use crate::piece::Piece;
use crate::rng::PieceRandomizer;
use crate::types::TetrominoKind;

/// What a hold request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold already used this turn, or nothing to hold
    Ignored,
    /// Current piece moved into the empty hold slot
    Stored,
    /// Current piece and hold piece exchanged
    Swapped,
    /// The held piece does not fit at the spawn position
    Rejected,
}

#[derive(Debug, Clone)]
pub struct SpawnQueue {
    randomizer: PieceRandomizer,
    next: Option<Piece>,
    hold: Option<Piece>,
    held_used: bool,
}

impl SpawnQueue {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            randomizer: PieceRandomizer::new(seed),
            next: None,
            hold: None,
            held_used: false,
        }
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn hold_piece(&self) -> Option<&Piece> {
        self.hold.as_ref()
    }

    pub fn held_used(&self) -> bool {
        self.held_used
    }

    /// Script the kind of an upcoming spawn
    pub fn push_preset(&mut self, kind: TetrominoKind) {
        self.randomizer.push_preset(kind);
    }

    /// A fresh unpositioned piece of a random kind
    pub fn spawn(&mut self) -> Piece {
        create_piece(self.randomizer.draw())
    }

    /// Center the piece horizontally and put its lowest filled row at row -1
    pub fn place_at_spawn(board: &Board, piece: &mut Piece) {
        let col = board.cols() as i32 / 2 - 1;
        let row = -(piece.shape.filled_height() as i32);
        piece.set_position(col, row);
    }

    /// Produce the next current piece: take `next` (or spawn one), place it at
    /// the spawn position and pre-roll a new `next`.
    pub fn activate(&mut self, board: &Board) -> Piece {
        let mut piece = match self.next.take() {
            Some(piece) => piece,
            None => self.spawn(),
        };
        Self::place_at_spawn(board, &mut piece);
        self.next = Some(self.spawn());

        debug!(kind = ?piece.kind, col = piece.col, row = piece.row, "piece spawned");
        piece
    }

    /// Apply a hold request to `current`.
    ///
    /// With an empty hold slot the current piece is stored and `current` is left
    /// empty. Otherwise the held piece is placed at the spawn position (with a
    /// single-cell kick if needed) and exchanged with the current piece, which
    /// keeps its shape and position in the hold slot.
    pub fn hold(&mut self, board: &Board, current: &mut Option<Piece>) -> HoldOutcome {
        if self.held_used || current.is_none() {
            return HoldOutcome::Ignored;
        }

        let Some(mut incoming) = self.hold.clone() else {
            self.hold = current.take();
            self.held_used = true;
            debug!(kind = ?self.hold.as_ref().map(|p| p.kind), "piece stored in hold");
            return HoldOutcome::Stored;
        };

        Self::place_at_spawn(board, &mut incoming);
        if !is_valid(board, &incoming) && !try_kick(board, &mut incoming) {
            debug!(kind = ?incoming.kind, "hold swap rejected");
            return HoldOutcome::Rejected;
        }

        debug!(kind = ?incoming.kind, "hold swapped");
        self.hold = current.replace(incoming);
        self.held_used = true;
        HoldOutcome::Swapped
    }

    /// A piece locked; hold becomes available again
    pub fn end_turn(&mut self) {
        self.held_used = false;
    }

    /// Empty every slot and drop scripted kinds. The random stream carries on.
    pub fn reset(&mut self) {
        self.next = None;
        self.hold = None;
        self.held_used = false;
        self.randomizer.clear_presets();
    }
}
