//! Movement controller - phases of the piece lifecycle and the legal moves
//!
//! ```text
//! Spawning -> Falling -> Locking -> Clearing -> Spawning
//!     \
//!      -> GameOver
//! ```
//!
//! Every candidate position is checked with [`collides`] before it is
//! committed, so the active piece can never overlap the board.

use serde::Serialize;

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::Tetromino;
use crate::types::Direction;

/// State of the session's piece lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A new piece is about to be rolled and placed
    Spawning,
    /// The active piece travels one cell per tick
    Falling,
    /// The active piece is blocked and will be merged into the board
    Locking,
    /// Full lines are cleared and gravity settles the board
    Clearing,
    /// A spawn collided; terminal until reset
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::Clearing => "clearing",
            Phase::GameOver => "game_over",
        }
    }

    /// Phases a clock tick comes to rest in
    pub fn is_resting(&self) -> bool {
        matches!(self, Phase::Falling | Phase::GameOver)
    }
}

/// One cell along the travel direction, or `None` if that would collide
pub fn try_advance(board: &Board, piece: &Tetromino) -> Option<Tetromino> {
    let next = piece.advanced();
    (!collides(board, &next)).then_some(next)
}

/// Next rotation state in place, or `None` if that would collide
pub fn try_rotate(board: &Board, piece: &Tetromino) -> Option<Tetromino> {
    let next = piece.rotated();
    (!collides(board, &next)).then_some(next)
}

/// Direction changes requested during one input sampling interval.
///
/// When several arrive in the same interval only the highest-priority one
/// (Right > Left > Up > Down) is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionRequests {
    mask: u8,
}

impl DirectionRequests {
    pub fn request(&mut self, direction: Direction) {
        self.mask |= 1 << direction.priority();
    }

    /// Winning request of this interval, if any
    pub fn resolve(&self) -> Option<Direction> {
        [
            Direction::Right,
            Direction::Left,
            Direction::Up,
            Direction::Down,
        ]
        .into_iter()
        .find(|d| self.mask & (1 << d.priority()) != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Close the interval
    pub fn clear(&mut self) {
        self.mask = 0;
    }
}
