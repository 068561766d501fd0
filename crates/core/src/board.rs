//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid stored as a flat row-major array of `0`/`1` cells.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! The array never changes size: clearing rows compacts the remaining rows downward
//! and zero-fills the freed rows at the top.

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::types::{BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

/// Row indices returned by a full-row scan (at most every row)
pub type FullRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [u8; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 || y >= BOARD_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y), `None` if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i16, y: i16, filled: bool) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = u8::from(filled);
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(1))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().fold(1u8, |acc, &cell| acc & cell) == 1)
    }

    /// Cells of row `y`, `None` if out of bounds
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Indices of every full row, lowest index first
    pub fn scan_full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the given rows and prepend as many empty rows at the top.
    ///
    /// Remaining rows keep their relative order. Out-of-range and duplicate
    /// indices are ignored. Returns the number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Compact from the bottom up, skipping removed rows.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(0);
        write_y
    }

    /// Scan and clear in one pass, returning the cleared row indices (lowest first)
    pub fn clear_full_rows(&mut self) -> FullRows {
        let rows = self.scan_full_rows();
        if !rows.is_empty() {
            self.clear_rows(&rows);
        }
        rows
    }

    /// A copy of the board with the piece's filled cells set.
    ///
    /// The board itself is left untouched; cells of the piece that fall outside
    /// the grid are skipped.
    pub fn project_merge(&self, piece: &ActivePiece) -> Board {
        let mut merged = self.clone();
        merged.commit_merge(piece);
        merged
    }

    /// Write the piece's filled cells into the board
    pub fn commit_merge(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.set(x, y, true);
        }
    }

    /// Zero-fill every cell
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Copy the board into a row-major 2D grid
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.cells.chunks_exact(BOARD_WIDTH as usize)) {
            dst.copy_from_slice(src);
        }
    }

    /// Build a board from row strings, `#` = filled, anything else = empty.
    ///
    /// Rows are aligned to the bottom of the board; missing rows are empty and
    /// extra columns are ignored.
    ///
    /// ```
    /// use tui_stacker_core::Board;
    ///
    /// let board = Board::from_rows(&["##########", "#####.####"]);
    /// assert!(board.is_row_full(18));
    /// assert!(!board.is_row_full(19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let height = BOARD_HEIGHT as usize;
        let skip = rows.len().saturating_sub(height);
        let top = height - (rows.len() - skip);
        for (i, row) in rows.iter().skip(skip).enumerate() {
            let y = (top + i) as i16;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                board.set(x as i16, y, ch == '#');
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
