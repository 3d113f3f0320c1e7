//! Pieces module - tetromino shape table and the active piece
//!
//! Shapes are 16-bit occupancy masks over a 4x4 box, row-major, with the most
//! significant bit as the top-left cell. Rotation simply indexes the next mask;
//! there are no kick offsets.

use crate::types::{Direction, PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to the top-left of the bounding box
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Occupancy masks indexed by `[kind][rotation]` (kinds in I, J, L, O, S, T, Z order)
pub const SHAPES: [[u16; 4]; 7] = [
    [0x0F00, 0x2222, 0x0F00, 0x2222], // I
    [0x8E00, 0x6440, 0x0E20, 0x44C0], // J
    [0x2E00, 0x4460, 0x0E80, 0xC440], // L
    [0x6600, 0x6600, 0x6600, 0x6600], // O
    [0x6C00, 0x4620, 0x6C00, 0x4620], // S
    [0x4E00, 0x4640, 0x0E40, 0x4C40], // T
    [0xC600, 0x2640, 0xC600, 0x2640], // Z
];

/// Raw occupancy mask for a kind and rotation
#[inline]
pub fn shape_mask(kind: PieceKind, rotation: Rotation) -> u16 {
    SHAPES[kind.index()][rotation.index()]
}

/// Whether cell `(bx, by)` of the 4x4 box is set in `mask`
#[inline]
pub fn mask_bit(mask: u16, bx: u8, by: u8) -> bool {
    (mask >> (15 - (by * 4 + bx))) & 1 == 1
}

/// Get the shape (mino offsets) for a piece kind and rotation
///
/// Offsets come out in row-major order of the mask.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let mask = shape_mask(kind, rotation);
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0;
    for by in 0..4u8 {
        for bx in 0..4u8 {
            if mask_bit(mask, bx, by) {
                out[n] = (bx as i8, by as i8);
                n += 1;
            }
        }
    }
    out
}

/// Active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Left edge of the 4x4 bounding box
    pub x: i8,
    /// Top edge of the 4x4 bounding box
    pub y: i8,
    pub direction: Direction,
}

impl Tetromino {
    /// Create a piece in its spawn rotation with the box centered on the board
    pub fn spawn(kind: PieceKind, direction: Direction) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
            direction,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// The same piece shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The same piece one cell further along its travel direction
    pub fn advanced(&self) -> Self {
        let (dx, dy) = self.direction.delta();
        self.shifted(dx, dy)
    }

    /// The same piece in the next rotation state
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}
