//! Engine configuration.

use crate::error::{EngineError, Result};
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_DROP_SPEED, DROP_CYCLE, MAX_BOARD_DIM, MIN_BOARD_DIM,
};

/// Largest accepted `drop_cycle`
pub const MAX_DROP_CYCLE: u32 = u32::MAX / 2;

/// Settings fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub cols: u16,
    pub rows: u16,
    /// Accumulator threshold for one gravity step
    pub drop_cycle: u32,
    /// Initial drop speed, clamped into `[0, drop_cycle]`
    pub drop_speed: u32,
    /// Randomizer seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn with_board(mut self, cols: u16, rows: u16) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_drop_speed(mut self, drop_speed: u32) -> Self {
        self.drop_speed = drop_speed;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols < MIN_BOARD_DIM || self.rows < MIN_BOARD_DIM {
            return Err(EngineError::InvalidConfig(format!(
                "board must be at least {MIN_BOARD_DIM}x{MIN_BOARD_DIM}, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.cols > MAX_BOARD_DIM || self.rows > MAX_BOARD_DIM {
            return Err(EngineError::InvalidConfig(format!(
                "board must be at most {MAX_BOARD_DIM}x{MAX_BOARD_DIM}, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.drop_cycle == 0 || self.drop_cycle > MAX_DROP_CYCLE {
            return Err(EngineError::InvalidConfig(format!(
                "drop cycle must be in 1..={MAX_DROP_CYCLE}, got {}",
                self.drop_cycle
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cols: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            drop_cycle: DROP_CYCLE,
            drop_speed: DEFAULT_DROP_SPEED,
            seed: None,
        }
    }
}
