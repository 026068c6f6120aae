//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data, usable from core logic, the engine and any host
//! that renders or drives the game.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//!
//! Pieces spawn above the board (negative rows) and fall into it.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_RATE_HZ` | 80 | Host tick rate |
//! | `DROP_CYCLE` | 1000 | Accumulator threshold for one gravity step |
//! | `DEFAULT_DROP_SPEED` | 50 | Added to the accumulator every tick |
//!
//! With the defaults a piece falls one row every 20 ticks (250ms).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, TetrominoKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = TetrominoKind::from_str("t").unwrap();
//! assert_eq!(kind, TetrominoKind::T);
//!
//! assert_eq!(Command::HardDrop.as_str(), "hardDrop");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Smallest board edge accepted by the engine
pub const MIN_BOARD_DIM: u16 = 4;

/// Largest board edge accepted by the engine
pub const MAX_BOARD_DIM: u16 = 256;

/// Host tick rate (ticks per second)
pub const TICK_RATE_HZ: u32 = 80;

/// Host tick interval in microseconds (12.5ms)
pub const TICK_US: u64 = 1_000_000 / TICK_RATE_HZ as u64;

/// Accumulator threshold for one gravity step
pub const DROP_CYCLE: u32 = 1000;

/// Drop speed a fresh game starts with
pub const DEFAULT_DROP_SPEED: u32 = 50;

/// Alpha applied to the shadow piece
pub const SHADOW_ALPHA: f32 = 0.3;

/// RGBA color. Channels are 0-255, alpha is 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Background of an empty board cell
    pub const EMPTY: Color = Color::GRAY;

    /// Fill of settled cells after game over
    pub const FROZEN: Color = Color::BLACK;

    /// Border of settled cells after game over
    pub const FROZEN_BORDER: Color = Color::WHITE;

    /// Border of the piece that topped out
    pub const TOPPED_OUT_BORDER: Color = Color::RED;

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::EMPTY
    }
}

/// The seven tetromino kinds
///
/// Each kind has a distinct shape and color:
/// - **I**: Cyan, vertical bar (4x4 bitmap)
/// - **J**: Blue (3x3 bitmap)
/// - **L**: Orange (3x3 bitmap)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green (3x3 bitmap)
/// - **T**: Purple (3x3 bitmap)
/// - **Z**: Red (3x3 bitmap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TetrominoKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoKind {
    /// All kinds, in table order
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::J,
        TetrominoKind::L,
        TetrominoKind::O,
        TetrominoKind::S,
        TetrominoKind::T,
        TetrominoKind::Z,
    ];

    /// Parse kind from a type tag (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::from_str("i"), Some(TetrominoKind::I));
    /// assert_eq!(TetrominoKind::from_str("O"), Some(TetrominoKind::O));
    /// assert_eq!(TetrominoKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoKind::I),
            "j" => Some(TetrominoKind::J),
            "l" => Some(TetrominoKind::L),
            "o" => Some(TetrominoKind::O),
            "s" => Some(TetrominoKind::S),
            "t" => Some(TetrominoKind::T),
            "z" => Some(TetrominoKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoKind::I => "I",
            TetrominoKind::J => "J",
            TetrominoKind::L => "L",
            TetrominoKind::O => "O",
            TetrominoKind::S => "S",
            TetrominoKind::T => "T",
            TetrominoKind::Z => "Z",
        }
    }
}

/// Phase of the game state machine
///
/// `Spawning -> Falling -> (Paused <-> Falling) -> GameOver`. A lock that does not
/// top out returns to `Spawning`; `GameOver` is left only by a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GamePhase {
    Spawning,
    Falling,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Spawning => "spawning",
            GamePhase::Falling => "falling",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Discrete input commands pushed into the engine by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    RotateClockwise,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Swap current piece with the hold slot (once per lock)
    Hold,
    /// Toggle pause
    Pause,
    /// Reset everything and start over
    Restart,
}

impl Command {
    /// camelCase name, used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::RotateClockwise => "rotateClockwise",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }
}
