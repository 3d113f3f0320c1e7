//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond conversions, making them
//! usable in any context (core logic, drivers, terminal rendering, reports).
//!
//! # Board Dimensions
//!
//! The playfield is square so that both axes can clear:
//!
//! - **Width**: 20 columns (indexed 0-19)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Center**: (10, 10), the pivot that splits the board into four quadrants
//! - **Spawn position**: (8, 8), the 4x4 bounding box centered on the pivot
//!
//! # Period
//!
//! The tick cadence is expressed as a timer period (counter cycles between timer
//! expirations). A session starts at [`INITIAL_PERIOD`] and only ever gets faster,
//! never dropping below [`PERIOD_FLOOR`].
//!
//! # Examples
//!
//! ```
//! use quadfall_types::{Direction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_index(5);
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color_id(), 6);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Direction::from_index(3), Direction::Right);
//!
//! assert_eq!(BOARD_WIDTH, 20);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (20 columns)
pub const BOARD_WIDTH: u8 = 20;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the vertical center line (first column of the right half)
pub const CENTER_X: u8 = BOARD_WIDTH / 2;

/// Row of the horizontal center line (first row of the lower half)
pub const CENTER_Y: u8 = BOARD_HEIGHT / 2;

/// Spawn position for the top-left of the 4x4 bounding box
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;
pub const SPAWN_Y: i8 = (BOARD_HEIGHT / 2) as i8 - 2;

/// Timer period a fresh session starts with
pub const INITIAL_PERIOD: u32 = 899_999;

/// Lowest period the difficulty controller will ever publish
pub const PERIOD_FLOOR: u32 = 1_000;

/// Period reduction per point of score, scaled by the clear tier
pub const PERIOD_STEP: u32 = 400;

/// Points added per lock event, indexed by the number of lines cleared (capped at 4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Frequency of the counter the period is expressed in (Hz)
pub const DEFAULT_CLOCK_HZ: u32 = 30_000_000;

/// Timer expirations per movement tick
pub const DEFAULT_TIMEOUTS_PER_STEP: u32 = 20;

/// Lower bound on the wall-clock interval between ticks in interactive play
pub const DEFAULT_MIN_STEP_MS: u32 = 40;

/// Input poll interval for interactive drivers (milliseconds)
pub const POLL_MS: u32 = 10;

/// The seven tetromino piece kinds, in shape-table order
///
/// Each kind has a fixed color id (`index + 1`):
/// - **I**: cyan
/// - **J**: blue
/// - **L**: orange
/// - **O**: yellow
/// - **S**: green
/// - **T**: purple
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Map any integer onto a kind (`n mod 7`)
    pub fn from_index(n: u32) -> Self {
        Self::ALL[(n % 7) as usize]
    }

    /// Position in the shape table (0..7)
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Board color id written when this kind locks (1..=7)
    pub fn color_id(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Inverse of [`PieceKind::color_id`]; 0 and out-of-range ids are empty
    ///
    /// # Examples
    ///
    /// ```
    /// use quadfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color_id(7), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_color_id(0), None);
    /// assert_eq!(PieceKind::from_color_id(8), None);
    /// ```
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation states, indexed 0..4 into the shape table
///
/// The cycle goes: North -> East -> South -> West -> North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise, i.e. `(r + 1) mod 4`
    ///
    /// # Examples
    ///
    /// ```
    /// use quadfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Map any integer onto a rotation (`n mod 4`)
    pub fn from_index(n: u32) -> Self {
        match n % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Autonomous travel direction of the active piece
///
/// Index order matches the spawn roll: 0 = Down, 1 = Up, 2 = Left, 3 = Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    /// Map any integer onto a direction (`n mod 4`)
    pub fn from_index(n: u32) -> Self {
        Self::ALL[(n % 4) as usize]
    }

    pub fn index(&self) -> usize {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// One-cell offset `(dx, dy)` along this direction (y grows downward)
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Rank used when several changes arrive in one sampling interval
    ///
    /// Right > Left > Up > Down.
    ///
    /// ```
    /// use quadfall_types::Direction;
    ///
    /// assert!(Direction::Right.priority() > Direction::Left.priority());
    /// assert!(Direction::Left.priority() > Direction::Up.priority());
    /// assert!(Direction::Up.priority() > Direction::Down.priority());
    /// ```
    pub fn priority(&self) -> u8 {
        match self {
            Direction::Right => 3,
            Direction::Left => 2,
            Direction::Up => 1,
            Direction::Down => 0,
        }
    }

    /// Parse direction from string (case-insensitive, full name or initial)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" | "d" => Some(Direction::Down),
            "up" | "u" => Some(Direction::Up),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Arrow glyph for HUDs
    pub fn arrow(&self) -> char {
        match self {
            Direction::Down => '↓',
            Direction::Up => '↑',
            Direction::Left => '←',
            Direction::Right => '→',
        }
    }
}

/// Intents a player (or script) can express
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Rotate the active piece one step clockwise
    Rotate,
    /// Change the travel direction of the active piece
    Steer(Direction),
    /// Start a new session (only honoured after game over)
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use quadfall_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("Left"), Some(GameAction::Steer(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("drop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(GameAction::Rotate),
            "restart" => Some(GameAction::Restart),
            other => Direction::from_str(other).map(GameAction::Steer),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate => "rotate",
            GameAction::Steer(d) => d.as_str(),
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty (color id 0)
/// - `Some(PieceKind)`: filled with that kind's color id
pub type Cell = Option<PieceKind>;

/// Summary of one lock event, recorded once the clear step has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub rows_cleared: u8,
    pub cols_cleared: u8,
    /// Last full row found by the row sweep (gravity pivot)
    pub pivot_row: Option<u8>,
    /// Last full column found by the column sweep (gravity pivot)
    pub pivot_col: Option<u8>,
    pub score_delta: u32,
    /// Relaxation passes that moved at least one cell
    pub gravity_frames: u32,
    pub gravity_moves: u32,
    /// Period after the difficulty update
    pub period: u32,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> u32 {
        self.rows_cleared as u32 + self.cols_cleared as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_box_is_centered_on_pivot() {
        assert_eq!(SPAWN_X, 8);
        assert_eq!(SPAWN_Y, 8);
        assert_eq!(SPAWN_X as u8 + 2, CENTER_X);
        assert_eq!(SPAWN_Y as u8 + 2, CENTER_Y);
    }

    #[test]
    fn color_ids_round_trip_for_every_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(kind));
            assert!((1..=7).contains(&kind.color_id()));
        }
    }

    #[test]
    fn direction_indices_follow_roll_order() {
        assert_eq!(Direction::from_index(0), Direction::Down);
        assert_eq!(Direction::from_index(1), Direction::Up);
        assert_eq!(Direction::from_index(2), Direction::Left);
        assert_eq!(Direction::from_index(3), Direction::Right);
        assert_eq!(Direction::from_index(7), Direction::Right);
    }

    #[test]
    fn line_score_tiers() {
        assert_eq!(LINE_SCORES[1], 100);
        assert_eq!(LINE_SCORES[2], 300);
        assert_eq!(LINE_SCORES[3], 500);
        assert_eq!(LINE_SCORES[4], 800);
    }
}
