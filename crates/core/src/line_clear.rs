//! Line clear module - dual-axis detection of complete rows and columns
//!
//! Both sweeps look at the board as it stood right after the lock, so a row
//! and a column completed by the same piece are both found even though they
//! share a cell. Every full line is then emptied in place; nothing shifts here.
//! Closing the gaps is the job of [`crate::gravity`].

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const ROWS: usize = BOARD_HEIGHT as usize;
const COLS: usize = BOARD_WIDTH as usize;

/// Lines found full by one sweep, in scan order (ascending index)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub rows: ArrayVec<u8, ROWS>,
    pub cols: ArrayVec<u8, COLS>,
}

impl ClearReport {
    /// Rows plus columns; this is what scoring sees
    pub fn total(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Last full row observed; the only row that drives gravity
    pub fn last_row(&self) -> Option<u8> {
        self.rows.last().copied()
    }

    /// Last full column observed; the only column that drives gravity
    pub fn last_col(&self) -> Option<u8> {
        self.cols.last().copied()
    }
}

/// Find every full row and column without modifying the board
pub fn scan_lines(board: &Board) -> ClearReport {
    let mut report = ClearReport::default();
    for y in 0..ROWS {
        if board.is_row_full(y) {
            report.rows.push(y as u8);
        }
    }
    for x in 0..COLS {
        if board.is_col_full(x) {
            report.cols.push(x as u8);
        }
    }
    report
}

/// Scan, then empty every full row and column
pub fn clear_lines(board: &mut Board) -> ClearReport {
    let report = scan_lines(board);
    for &y in &report.rows {
        board.clear_row(y as usize);
    }
    for &x in &report.cols {
        board.clear_col(x as usize);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    fn fill_col(board: &mut Board, x: i8) {
        for y in 0..BOARD_HEIGHT as i8 {
            board.set(x, y, Some(PieceKind::J));
        }
    }

    #[test]
    fn nothing_full_reports_nothing() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::O));
        let report = clear_lines(&mut board);
        assert!(report.is_empty());
        assert_eq!(report.total(), 0);
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn last_row_is_highest_index() {
        let mut board = Board::new();
        fill_row(&mut board, 3);
        fill_row(&mut board, 15);
        fill_row(&mut board, 7);

        let report = clear_lines(&mut board);
        assert_eq!(report.rows.as_slice(), &[3, 7, 15]);
        assert_eq!(report.last_row(), Some(15));
        assert_eq!(report.last_col(), None);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn crossing_row_and_column_both_clear() {
        let mut board = Board::new();
        fill_row(&mut board, 12);
        fill_col(&mut board, 4);
        board.set(0, 0, Some(PieceKind::T));

        let report = clear_lines(&mut board);
        assert_eq!(report.total(), 2);
        assert_eq!(report.last_row(), Some(12));
        assert_eq!(report.last_col(), Some(4));
        assert_eq!(board.filled_count(), 1);
        assert!(board.is_occupied(0, 0));
    }

    #[test]
    fn scan_does_not_mutate() {
        let mut board = Board::new();
        fill_col(&mut board, 19);
        let before = board.clone();
        let report = scan_lines(&board);
        assert_eq!(report.cols.as_slice(), &[19]);
        assert_eq!(board, before);
    }
}
