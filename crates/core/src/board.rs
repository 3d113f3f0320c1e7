//! Board module - manages the game grid
//!
//! The board is a square 20x20 grid where each cell is empty or holds the kind
//! whose color id was written at lock time. Storage is a flat row-major array,
//! so every primitive here is allocation-free.
//!
//! Coordinates: (x, y) where x ranges 0..19 (left to right), y ranges 0..19
//! (top to bottom).

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Board contents as color ids, indexed `[y][x]`
pub type ColorGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 20 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
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

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Color id at (x, y); 0 for empty or out of bounds
    pub fn color_id(&self, x: i8, y: i8) -> u8 {
        match self.get(x, y) {
            Some(Some(kind)) => kind.color_id(),
            _ => 0,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, x: usize) -> bool {
        if x >= BOARD_WIDTH as usize {
            return false;
        }
        self.cells
            .iter()
            .skip(x)
            .step_by(BOARD_WIDTH as usize)
            .all(|cell| cell.is_some())
    }

    /// Empty every cell of a row in place (nothing shifts)
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize].fill(None);
    }

    /// Empty every cell of a column in place (nothing shifts)
    pub fn clear_col(&mut self, x: usize) {
        if x >= BOARD_WIDTH as usize {
            return;
        }
        for cell in self.cells.iter_mut().skip(x).step_by(BOARD_WIDTH as usize) {
            *cell = None;
        }
    }

    /// Move the block at (x, y) one step by (dx, dy) if the destination is empty.
    ///
    /// Returns true when a block moved. An empty source, an out-of-bounds
    /// destination or an occupied destination leave the board untouched.
    pub fn slide(&mut self, x: i8, y: i8, dx: i8, dy: i8) -> bool {
        let (Some(from), Some(to)) = (Self::index(x, y), Self::index(x + dx, y + dy)) else {
            return false;
        };
        if self.cells[from].is_none() || self.cells[to].is_some() {
            return false;
        }
        self.cells[to] = self.cells[from].take();
        true
    }

    /// Lock a piece onto the board at given position with given shape
    /// Returns true if successful, false if any cell is out of bounds or occupied
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, kind: PieceKind) -> bool {
        // First check if all positions are valid
        if !shape.iter().all(|&(dx, dy)| self.is_valid(x + dx, y + dy)) {
            return false;
        }

        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }

        true
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write the board as color ids into `out`
    pub fn write_u8_grid(&self, out: &mut ColorGrid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map_or(0, |k| k.color_id());
            }
        }
    }

    /// Build a board from color ids; ids outside 1..=7 read as empty
    pub fn from_u8_grid(grid: &ColorGrid) -> Self {
        let mut board = Self::new();
        let width = BOARD_WIDTH as usize;
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * width + x] = PieceKind::from_color_id(v);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(19, 0), Some(19));
        assert_eq!(Board::index(0, 1), Some(20));
        assert_eq!(Board::index(19, 19), Some(399));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(20, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_column_full_and_clear() {
        let mut board = Board::new();
        for y in 0..20 {
            board.set(4, y, Some(PieceKind::J));
        }
        assert!(board.is_col_full(4));
        assert!(!board.is_col_full(5));

        board.clear_col(4);
        assert!(!board.is_col_full(4));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_clear_row_does_not_shift() {
        let mut board = Board::new();
        board.set(3, 2, Some(PieceKind::S));
        for x in 0..20 {
            board.set(x, 5, Some(PieceKind::I));
        }
        board.clear_row(5);
        assert_eq!(board.get(3, 2), Some(Some(PieceKind::S)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_slide_respects_destination() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::O));
        board.set(1, 0, Some(PieceKind::Z));

        assert!(!board.slide(0, 0, 1, 0), "destination occupied");
        assert!(!board.slide(0, 0, -1, 0), "destination out of bounds");
        assert!(!board.slide(5, 5, 0, 1), "empty source");
        assert!(board.slide(1, 0, 0, 1));
        assert_eq!(board.get(1, 1), Some(Some(PieceKind::Z)));
        assert_eq!(board.get(1, 0), Some(None));
    }

    #[test]
    fn test_u8_grid_round_trip_keeps_color_ids() {
        let mut grid: ColorGrid = [[0; 20]; 20];
        grid[0][0] = 1;
        grid[19][19] = 7;
        grid[10][3] = 4;
        let board = Board::from_u8_grid(&grid);

        let mut out: ColorGrid = [[9; 20]; 20];
        board.write_u8_grid(&mut out);
        assert_eq!(out, grid);
    }
}
