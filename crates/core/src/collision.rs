//! Collision predicate - the single legality check for every piece mutation.

use crate::board::Board;
use crate::pieces::Tetromino;

/// True if any mino of `piece` lies outside the board or on a filled cell.
#[inline]
pub fn collides(board: &Board, piece: &Tetromino) -> bool {
    piece
        .cells()
        .iter()
        .any(|&(x, y)| !board.is_valid(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, PieceKind, Rotation};

    fn piece_at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Tetromino {
        Tetromino {
            kind,
            rotation,
            x,
            y,
            direction: Direction::Down,
        }
    }

    #[test]
    fn empty_board_spawn_is_free() {
        let board = Board::new();
        let piece = Tetromino::spawn(PieceKind::T, Direction::Down);
        assert!(!collides(&board, &piece));
    }

    #[test]
    fn bounding_box_may_hang_off_the_board() {
        let board = Board::new();
        // I North only uses row 1 of its box.
        let piece = piece_at(PieceKind::I, Rotation::North, 0, -1);
        assert!(!collides(&board, &piece));
        // I East only uses column 2 of its box.
        let piece = piece_at(PieceKind::I, Rotation::East, -2, 0);
        assert!(!collides(&board, &piece));
    }

    #[test]
    fn any_mino_outside_collides() {
        let board = Board::new();
        assert!(collides(&board, &piece_at(PieceKind::O, Rotation::North, 18, 0)));
        assert!(collides(&board, &piece_at(PieceKind::O, Rotation::North, 0, 19)));
        assert!(collides(&board, &piece_at(PieceKind::O, Rotation::North, -2, 0)));
        assert!(collides(&board, &piece_at(PieceKind::O, Rotation::North, 0, -1)));
    }

    #[test]
    fn filled_cell_collides() {
        let mut board = Board::new();
        let piece = piece_at(PieceKind::O, Rotation::North, 4, 4);
        assert!(!collides(&board, &piece));
        // O occupies (5,4),(6,4),(5,5),(6,5).
        board.set(6, 5, Some(PieceKind::Z));
        assert!(collides(&board, &piece));
    }
}
