use serde::Serialize;

use crate::board::ColorGrid;
use crate::machine::Phase;
use crate::pieces::Tetromino;
use crate::types::{Direction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_PERIOD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub direction: Direction,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            direction: value.direction,
        }
    }
}

impl From<ActiveSnapshot> for Tetromino {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            direction: value.direction,
        }
    }
}

/// Read-only copy of everything a renderer or report needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: ColorGrid,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub game_over: bool,
    pub seed: u32,
    pub score: u32,
    pub period: u32,
    pub lines: u32,
    pub pieces: u32,
    pub ticks: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.phase = Phase::Spawning;
        self.game_over = false;
        self.seed = 0;
        self.score = 0;
        self.period = INITIAL_PERIOD;
        self.lines = 0;
        self.pieces = 0;
        self.ticks = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            phase: Phase::Spawning,
            game_over: false,
            seed: 0,
            score: 0,
            period: INITIAL_PERIOD,
            lines: 0,
            pieces: 0,
            ticks: 0,
        }
    }
}
