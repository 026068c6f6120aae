//! RNG module - uniform random piece selection
//!
//! Every draw picks one of the seven kinds independently and uniformly; there is
//! no bag and no anti-repeat rule. A scripted prefix of kinds can be queued with
//! [`PieceRandomizer::push_preset`]; preset kinds are handed out first, in order.
//!
//! Seeded randomizers produce the same sequence for the same seed.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::TetrominoKind;

#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: StdRng,
    preset: VecDeque<TetrominoKind>,
}

impl PieceRandomizer {
    /// Create a randomizer; `None` seeds from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            preset: VecDeque::new(),
        }
    }

    /// Queue a kind to be drawn before random draws resume
    pub fn push_preset(&mut self, kind: TetrominoKind) {
        self.preset.push_back(kind);
    }

    /// Drop any queued preset kinds
    pub fn clear_presets(&mut self) {
        self.preset.clear();
    }

    #[cfg(test)]
    pub(crate) fn presets_pending(&self) -> usize {
        self.preset.len()
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> TetrominoKind {
        if let Some(kind) = self.preset.pop_front() {
            return kind;
        }
        *TetrominoKind::ALL
            .choose(&mut self.rng)
            .unwrap_or(&TetrominoKind::I)
    }
}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(None)
    }
}
