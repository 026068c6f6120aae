//! Piece geometry and rotation.
//!
//! A piece carries its own square shape bitmap (2x2, 3x3 or 4x4) stored inline,
//! so cloning or rotating always produces an independent bitmap.

use serde::Serialize;

use crate::types::{Color, TetrominoKind};

/// Largest shape edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy bitmap, `size x size` cells of a 4x4 array are meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    size: u8,
    bits: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from `0/1` rows. Every row must be as long as the row count.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE_SIZE);
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                bits[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: N as u8,
            bits,
        }
    }

    /// Edge length of the bitmap
    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.bits[row][col]
    }

    /// Rotate 90° clockwise: `rotated[c][n - 1 - r] = shape[r][c]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for r in 0..n {
            for c in 0..n {
                bits[c][n - 1 - r] = self.bits[r][c];
            }
        }
        Self {
            size: self.size,
            bits,
        }
    }

    /// (row, col) offsets of filled cells, top to bottom, left to right
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |r| (0..n).filter(move |&c| self.bits[r][c]).map(move |c| (r, c)))
    }

    /// Board (col, row) of every filled cell with the bitmap's top-left at `(col, row)`
    pub fn cells_at(&self, col: i32, row: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.filled()
            .map(move |(r, c)| (col + c as i32, row + r as i32))
    }

    /// One past the index of the lowest row containing a filled cell (0 if blank)
    pub fn filled_height(&self) -> usize {
        (0..self.size())
            .rev()
            .find(|&r| self.bits[r].iter().any(|&b| b))
            .map_or(0, |r| r + 1)
    }

    /// Rows of the bitmap as text, `#` for filled (debugging aid)
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.size())
            .map(|r| {
                (0..self.size())
                    .map(|c| if self.bits[r][c] { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

/// A tetromino with position in board cells
///
/// `row` may be negative while the piece is above the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub shape: Shape,
    pub col: i32,
    pub row: i32,
    pub color: Color,
    pub border: Color,
}

impl Piece {
    /// Create an unpositioned piece at (0, 0)
    pub fn new(kind: TetrominoKind, shape: Shape, color: Color) -> Self {
        Self {
            kind,
            shape,
            col: 0,
            row: 0,
            color,
            border: Color::BLACK,
        }
    }

    pub fn set_position(&mut self, col: i32, row: i32) {
        self.col = col;
        self.row = row;
    }

    /// Translate by a delta in board cells
    pub fn move_by(&mut self, d_col: i32, d_row: i32) {
        self.col += d_col;
        self.row += d_row;
    }

    pub fn rotate_cw(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Absolute (col, row) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.cells_at(self.col, self.row)
    }

    /// Rows spanned by filled cells, top to bottom, without repeats
    pub fn filled_rows(&self) -> impl Iterator<Item = i32> + '_ {
        let n = self.shape.size();
        (0..n)
            .filter(move |&r| (0..n).any(|c| self.shape.is_filled(r, c)))
            .map(move |r| self.row + r as i32)
    }

    /// Copy used for the shadow projection: same geometry, translucent colors
    pub fn translucent(&self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
            border: self.border.with_alpha(alpha),
            ..self.clone()
        }
    }

    /// Paint with the topped-out colors
    pub fn freeze(&mut self) {
        self.color = Color::FROZEN;
        self.border = Color::TOPPED_OUT_BORDER;
    }
}
