//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the board lives here: the LCG
//! spawner, the shape table, collision, dual-axis line clearing, quadrant
//! gravity, scoring and the session state machine. There is no I/O and no
//! wall clock; a driver injects ticks and input.
//!
//! # Module Structure
//!
//! - [`rng`]: 15-bit linear congruential generator that rolls spawns
//! - [`pieces`]: 16-bit shape masks and the active [`Tetromino`]
//! - [`board`]: 20x20 grid of color ids
//! - [`collision`]: bounds and overlap test for a candidate placement
//! - [`line_clear`]: full row and column detection
//! - [`gravity`]: quadrant-relative collapse toward the nearest edge
//! - [`scoring`]: line points and the score-to-period feedback
//! - [`machine`]: lifecycle phases, legal moves and direction priority
//! - [`session`]: [`GameSession`], the one owner of all mutable state
//! - [`snapshot`]: read-only copies for renderers and reports
//!
//! # Rules in brief
//!
//! A piece spawns centered with a random travel direction and moves one cell
//! per tick toward one of the four walls. When the next cell is blocked it
//! locks. Full rows and columns are emptied, then the half of the board the
//! clear happened in collapses toward its nearest edge. The more you score
//! the shorter the tick period gets.
//!
//! # Example
//!
//! ```
//! use quadfall_core::GameSession;
//! use quadfall_core::types::Direction;
//!
//! let mut game = GameSession::new(12345);
//! game.request_direction(Direction::Left);
//! game.end_input_interval();
//! game.request_rotate();
//! for _ in 0..10 {
//!     game.tick();
//! }
//! assert!(game.pieces() >= 1);
//! ```

pub mod board;
pub mod collision;
pub mod gravity;
pub mod line_clear;
pub mod machine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use quadfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ColorGrid};
pub use collision::collides;
pub use gravity::{Collapse, GravityReport};
pub use line_clear::{clear_lines, scan_lines, ClearReport};
pub use machine::{try_advance, try_rotate, DirectionRequests, Phase};
pub use pieces::{get_shape, PieceShape, Tetromino};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, ScoreResult};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
