//! Gravity module - quadrant-relative collapse after a clear
//!
//! The board is split by its center lines into four quadrants. A cleared row
//! pulls the half of the board it lies in toward the nearest horizontal edge
//! (upper half upward, lower half downward); a cleared column pulls its half
//! toward the nearest vertical edge, the rows above and below center moving
//! independently.
//!
//! Settling is done by repeated relaxation: one pass moves each eligible block
//! a single cell if the destination is empty at that moment, and passes repeat
//! until one moves nothing. A block can be held up mid-collapse by another
//! block still travelling toward the same sink, so there is no closed-form
//! drop distance. Every pass that moved something is one animation frame.

use crate::board::Board;
use crate::line_clear::ClearReport;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, CENTER_X, CENTER_Y};

const W: i8 = BOARD_WIDTH as i8;
const H: i8 = BOARD_HEIGHT as i8;
const CX: i8 = CENTER_X as i8;
const CY: i8 = CENTER_Y as i8;

/// Where the rows of the pivot row's half are pulled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSink {
    /// Upper half moves toward y = 0
    Top,
    /// Lower half moves toward y = H-1
    Bottom,
}

/// Where the columns of the pivot column's half are pulled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColSink {
    /// Left half moves toward x = 0
    Left,
    /// Right half moves toward x = W-1
    Right,
}

/// Result of running a collapse to its fixed point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityReport {
    /// Passes that moved at least one block
    pub frames: u32,
    /// Total single-cell moves
    pub moves: u32,
}

/// A collapse configured from the pivot row/column of a clear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collapse {
    row_sink: Option<RowSink>,
    col_sink: Option<ColSink>,
}

impl Collapse {
    pub fn new(pivot_row: Option<u8>, pivot_col: Option<u8>) -> Self {
        let row_sink = pivot_row.map(|y| {
            if (y as i8) < CY {
                RowSink::Top
            } else {
                RowSink::Bottom
            }
        });
        let col_sink = pivot_col.map(|x| {
            if (x as i8) >= CX {
                ColSink::Right
            } else {
                ColSink::Left
            }
        });
        Self { row_sink, col_sink }
    }

    /// Pivot on the last row and last column a clear reported
    pub fn from_report(report: &ClearReport) -> Self {
        Self::new(report.last_row(), report.last_col())
    }

    pub fn row_sink(&self) -> Option<RowSink> {
        self.row_sink
    }

    pub fn col_sink(&self) -> Option<ColSink> {
        self.col_sink
    }

    /// Nothing was cleared, nothing will move
    pub fn is_noop(&self) -> bool {
        self.row_sink.is_none() && self.col_sink.is_none()
    }

    /// One relaxation pass; returns the number of blocks moved.
    ///
    /// Cells are visited from the sink outward, so a block that just moved is
    /// never visited again within the same pass.
    pub fn relax_pass(&self, board: &mut Board) -> u32 {
        let mut moves = 0;

        match self.row_sink {
            Some(RowSink::Top) => {
                for y in 1..CY {
                    for x in 0..W {
                        moves += board.slide(x, y, 0, -1) as u32;
                    }
                }
            }
            Some(RowSink::Bottom) => {
                for y in (CY..H - 1).rev() {
                    for x in 0..W {
                        moves += board.slide(x, y, 0, 1) as u32;
                    }
                }
            }
            None => {}
        }

        if let Some(sink) = self.col_sink {
            // Upper quadrant first, then lower; rows never interact horizontally.
            for band in [0..CY, CY..H] {
                moves += match sink {
                    ColSink::Right => {
                        let mut n = 0;
                        for x in (CX..W - 1).rev() {
                            for y in band.clone() {
                                n += board.slide(x, y, 1, 0) as u32;
                            }
                        }
                        n
                    }
                    ColSink::Left => {
                        let mut n = 0;
                        for x in 1..CX {
                            for y in band.clone() {
                                n += board.slide(x, y, -1, 0) as u32;
                            }
                        }
                        n
                    }
                };
            }
        }

        moves
    }

    /// Relax until a pass makes no moves, handing the board to `on_frame`
    /// after every pass that moved something.
    pub fn run(&self, board: &mut Board, mut on_frame: impl FnMut(&Board)) -> GravityReport {
        let mut report = GravityReport::default();
        if self.is_noop() {
            return report;
        }
        loop {
            let moved = self.relax_pass(board);
            if moved == 0 {
                return report;
            }
            report.frames += 1;
            report.moves += moved;
            on_frame(board);
        }
    }
}
