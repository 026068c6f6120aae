//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell is either empty or holds a
//! settled block with its color. Storage is a flat vector in row-major order.
//! Coordinates: (col, row) where col grows left to right and row grows top to bottom.
//! Out-of-range queries return `None`; higher layers rely on that to mean
//! "nothing here", never as a fault.

use serde::Serialize;

use crate::types::Color;

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub occupied: bool,
    pub value: u8,
    pub color: Color,
    pub border: Color,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        value: 0,
        color: Color::EMPTY,
        border: Color::BLACK,
    };

    /// Build a cell holding `value`; a zero value is an empty cell
    pub fn new(value: u8, color: Color) -> Self {
        if value == 0 {
            return Cell::EMPTY;
        }
        Cell {
            occupied: true,
            value,
            color,
            border: Color::BLACK,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// The game board - fixed dimensions, flat row-major storage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    cols: u16,
    rows: u16,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::EMPTY; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.cols as i32 || row < 0 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Get cell at (col, row), `None` if out of bounds
    pub fn cell_at(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|idx| &self.cells[idx])
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        self.cell_at(col, row).is_some_and(|c| c.occupied)
    }

    /// Set cell at (col, row).
    /// Returns false if out of bounds
    pub fn set_cell(&mut self, col: i32, row: i32, value: u8, color: Color) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = Cell::new(value, color);
                true
            }
            None => false,
        }
    }

    /// Cells of one row, left to right
    pub fn row_cells(&self, row: i32) -> Option<&[Cell]> {
        if row < 0 || row >= self.rows as i32 {
            return None;
        }
        let width = self.cols as usize;
        let start = row as usize * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i32) -> bool {
        self.row_cells(row)
            .is_some_and(|cells| cells.iter().all(|c| c.occupied))
    }

    /// Remove a row: every row above shifts down by one and row 0 becomes empty.
    /// Returns false if `row` is out of bounds.
    pub fn clear_row(&mut self, row: i32) -> bool {
        if row < 0 || row >= self.rows as i32 {
            return false;
        }

        let width = self.cols as usize;
        for r in (1..=row as usize).rev() {
            let (above, below) = self.cells.split_at_mut(r * width);
            let src = &above[(r - 1) * width..];
            let dst = &mut below[..width];
            assert_eq!(
                src.len(),
                dst.len(),
                "row length mismatch while shifting row {} into {}",
                r - 1,
                r
            );
            dst.copy_from_slice(src);
        }

        for cell in &mut self.cells[..width] {
            *cell = Cell::EMPTY;
        }

        true
    }

    /// Mark every settled block with the game-over colors
    pub fn freeze(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.occupied) {
            cell.color = Color::FROZEN;
            cell.border = Color::FROZEN_BORDER;
        }
    }

    /// Enumerate all cells as (col, row, cell), row by row
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, &Cell)> + '_ {
        let width = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| ((i % width) as i32, (i / width) as i32, c))
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::EMPTY;
        }
    }

    /// Build a board from text rows, `#` marks a filled cell (for testing)
    #[cfg(test)]
    pub fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows[0].len() as u16;
        let mut board = Board::new(cols, rows.len() as u16);
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), cols as usize);
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.set_cell(c as i32, r as i32, 1, Color::RED);
                }
            }
        }
        board
    }

    /// Render as text rows, `#` for filled (for testing)
    #[cfg(test)]
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.rows as i32)
            .map(|r| {
                self.row_cells(r)
                    .unwrap_or_default()
                    .iter()
                    .map(|c| if c.occupied { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}
