//! RNG module - deterministic piece and direction rolls
//!
//! A 32-bit linear congruential generator whose output is the 15 high-order
//! bits of the state, so every draw lies in `[0, 32767]`. The session seeds it
//! once from driver-supplied entropy; nothing else in the core is random.

use crate::pieces::Tetromino;
use crate::types::{Direction, PieceKind};

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12_345;

/// Largest value [`SimpleRng::next_u15`] can return
pub const RNG_MAX: u32 = 0x7fff;

/// Simple LCG (Linear Congruential Generator) RNG
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    ///
    /// Zero is a valid seed: the increment keeps the sequence moving.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next value in `[0, 32767]`
    pub fn next_u15(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.state >> 16) & RNG_MAX
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u15() % max
    }

    /// Roll the kind and travel direction of a freshly spawned piece.
    ///
    /// Kind is drawn first, then direction; changing the order would change
    /// every seeded game.
    pub fn roll_spawn(&mut self) -> Tetromino {
        let kind = PieceKind::from_index(self.next_range(7));
        let direction = Direction::from_index(self.next_range(4));
        Tetromino::spawn(kind, direction)
    }

    /// Current internal state (for diagnostics)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
