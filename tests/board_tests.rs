//! Board tests

use quadfall::core::{clear_lines, scan_lines, Board};
use quadfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.color_id(x, y), 0);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_valid(20, 5));
}

#[test]
fn test_board_set_and_color_id() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.color_id(5, 10), PieceKind::T.color_id());
    assert!(!board.is_valid(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
}

#[test]
fn test_every_cell_holds_a_valid_color_id() {
    let mut board = Board::new();
    for (i, kind) in PieceKind::ALL.iter().enumerate() {
        board.set(i as i8, i as i8, Some(*kind));
    }
    let mut grid = [[0u8; 20]; 20];
    board.write_u8_grid(&mut grid);
    assert!(grid.iter().flatten().all(|&v| v <= 7));
    assert_eq!(grid[3][3], 4);
}

#[test]
fn test_lock_piece_rejects_overlap_and_bounds() {
    let mut board = Board::new();
    let shape: [(i8, i8); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
    assert!(board.lock_piece(&shape, 0, 0, PieceKind::O));
    assert!(!board.lock_piece(&shape, 1, 1, PieceKind::O));
    assert!(!board.lock_piece(&shape, 19, 0, PieceKind::O));
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_row_and_column_completed_together_are_both_cleared() {
    let mut board = Board::new();
    for i in 0..20 {
        board.set(i, 10, Some(PieceKind::L));
        board.set(3, i, Some(PieceKind::J));
    }

    let report = scan_lines(&board);
    assert_eq!(report.rows.as_slice(), &[10]);
    assert_eq!(report.cols.as_slice(), &[3]);

    let report = clear_lines(&mut board);
    assert_eq!(report.total(), 2);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_clear_leaves_other_cells_in_place() {
    let mut board = Board::new();
    for x in 0..20 {
        board.set(x, 19, Some(PieceKind::S));
    }
    board.set(7, 18, Some(PieceKind::Z));

    let report = clear_lines(&mut board);
    assert_eq!(report.last_row(), Some(19));
    assert_eq!(report.last_col(), None);
    assert!(board.is_occupied(7, 18));
    assert_eq!(board.filled_count(), 1);
}
