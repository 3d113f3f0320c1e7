//! Game session - owns the board, the active piece, the RNG and the score
//!
//! The session is advanced from outside: a clock calls [`GameSession::tick`]
//! at the current period, and input sampling calls the `request_*` methods
//! between ticks. Nothing here blocks, allocates or reads the wall clock.

use tracing::{debug, info};

use crate::board::{Board, ColorGrid};
use crate::collision::collides;
use crate::gravity::Collapse;
use crate::line_clear::clear_lines;
use crate::machine::{try_advance, try_rotate, DirectionRequests, Phase};
use crate::pieces::Tetromino;
use crate::rng::SimpleRng;
use crate::scoring::calculate_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    Direction, LockEvent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_PERIOD,
};

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<Tetromino>,
    /// Kind merged by the last `Locking` step, consumed by `Clearing`.
    locked_kind: Option<PieceKind>,
    rng: SimpleRng,
    seed: u32,
    phase: Phase,
    directions: DirectionRequests,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    period: u32,
    lines: u32,
    pieces: u32,
    ticks: u64,
}

impl GameSession {
    /// Start a session on an empty board and spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::from_board(Board::new(), seed)
    }

    /// Start a session on a prepared board and spawn the first piece.
    ///
    /// If the spawn region is already blocked the session is over before the
    /// first tick.
    pub fn from_board(board: Board, seed: u32) -> Self {
        let mut session = Self {
            board,
            active: None,
            locked_kind: None,
            rng: SimpleRng::new(seed),
            seed,
            phase: Phase::Spawning,
            directions: DirectionRequests::default(),
            last_event: None,
            score: 0,
            period: INITIAL_PERIOD,
            lines: 0,
            pieces: 0,
            ticks: 0,
        };
        session.step();
        info!(seed, game_over = session.is_game_over(), "session started");
        session
    }

    /// Start over with a fresh board, score, period and RNG.
    ///
    /// Only honoured once the session is over; returns whether it happened.
    pub fn reset(&mut self, seed: u32) -> bool {
        if !self.is_game_over() {
            debug!(phase = self.phase.as_str(), "reset ignored while playing");
            return false;
        }
        *self = Self::new(seed);
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Rows plus columns cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces successfully spawned this session
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board contents as color ids
    pub fn snapshot_board(&self) -> ColorGrid {
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.board.write_u8_grid(&mut grid);
        grid
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.game_over = self.is_game_over();
        out.seed = self.seed;
        out.score = self.score;
        out.period = self.period;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.ticks = self.ticks;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock/line-clear event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Rotate the active piece one step clockwise if the result is free.
    ///
    /// Returns whether the rotation was committed.
    pub fn request_rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        match try_rotate(&self.board, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Record a direction change for the current input interval.
    ///
    /// The active piece immediately takes the highest-priority direction
    /// requested so far in this interval. Returns the direction now in effect.
    pub fn request_direction(&mut self, direction: Direction) -> Option<Direction> {
        let active = self.active.as_mut()?;
        self.directions.request(direction);
        if let Some(winner) = self.directions.resolve() {
            active.direction = winner;
        }
        Some(active.direction)
    }

    /// Close the current input sampling interval
    pub fn end_input_interval(&mut self) {
        self.directions.clear();
    }

    /// One clock tick: step until the machine rests in `Falling` or `GameOver`.
    ///
    /// A blocked move therefore locks, clears, settles and spawns within the
    /// same tick.
    pub fn tick(&mut self) -> Phase {
        self.tick_with(|_| {})
    }

    /// Like [`GameSession::tick`], handing every gravity animation frame to
    /// `on_frame`.
    pub fn tick_with(&mut self, mut on_frame: impl FnMut(&Board)) -> Phase {
        if self.is_game_over() {
            return self.phase;
        }
        self.ticks += 1;
        loop {
            let phase = self.advance(&mut on_frame);
            if phase.is_resting() {
                return phase;
            }
        }
    }

    /// Exactly one state-machine transition
    pub fn step(&mut self) -> Phase {
        self.advance(&mut |_| {})
    }

    fn advance(&mut self, on_frame: &mut dyn FnMut(&Board)) -> Phase {
        self.phase = match self.phase {
            Phase::Spawning => self.spawn(),
            Phase::Falling => self.fall(),
            Phase::Locking => self.lock(),
            Phase::Clearing => self.clear(on_frame),
            Phase::GameOver => Phase::GameOver,
        };
        self.phase
    }

    fn spawn(&mut self) -> Phase {
        let piece = self.rng.roll_spawn();
        if collides(&self.board, &piece) {
            self.active = None;
            info!(
                score = self.score,
                lines = self.lines,
                pieces = self.pieces,
                "game over"
            );
            return Phase::GameOver;
        }
        self.active = Some(piece);
        self.pieces = self.pieces.wrapping_add(1);
        Phase::Falling
    }

    fn fall(&mut self) -> Phase {
        let Some(active) = self.active else {
            return Phase::Spawning;
        };
        match try_advance(&self.board, &active) {
            Some(moved) => {
                self.active = Some(moved);
                Phase::Falling
            }
            None => Phase::Locking,
        }
    }

    fn lock(&mut self) -> Phase {
        let Some(active) = self.active.take() else {
            return Phase::Spawning;
        };
        let locked = self
            .board
            .lock_piece(&active.shape(), active.x, active.y, active.kind);
        assert!(locked, "active piece overlapped the board at lock: {:?}", active);
        self.locked_kind = Some(active.kind);
        Phase::Clearing
    }

    fn clear(&mut self, on_frame: &mut dyn FnMut(&Board)) -> Phase {
        let report = clear_lines(&mut self.board);
        let gravity = Collapse::from_report(&report).run(&mut self.board, |b| on_frame(b));

        let lines = report.total();
        let result = calculate_score(lines, self.score, self.period);
        self.score = result.score;
        self.lines = self.lines.saturating_add(lines);

        if lines > 0 {
            debug!(
                rows = report.rows.len(),
                cols = report.cols.len(),
                pivot_row = ?report.last_row(),
                pivot_col = ?report.last_col(),
                gravity_frames = gravity.frames,
                score = self.score,
                "lines cleared"
            );
        }
        if result.period != self.period {
            debug!(from = self.period, to = result.period, "period changed");
            self.period = result.period;
        }

        if let Some(kind) = self.locked_kind.take() {
            self.last_event = Some(LockEvent {
                kind,
                rows_cleared: report.rows.len() as u8,
                cols_cleared: report.cols.len() as u8,
                pivot_row: report.last_row(),
                pivot_col: report.last_col(),
                score_delta: result.points,
                gravity_frames: gravity.frames,
                gravity_moves: gravity.moves,
                period: self.period,
            });
        }
        Phase::Spawning
    }

    /// Replace the active piece (test setup only)
    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Tetromino) {
        self.active = Some(piece);
        self.phase = Phase::Falling;
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, PERIOD_FLOOR, SPAWN_X, SPAWN_Y};

    fn place(session: &mut GameSession, kind: PieceKind, x: i8, y: i8, direction: Direction) {
        session.set_active(Tetromino {
            kind,
            rotation: Rotation::North,
            x,
            y,
            direction,
        });
    }

    #[test]
    fn test_new_session_spawns_first_piece() {
        let session = GameSession::new(12345);
        assert_eq!(session.phase(), Phase::Falling);
        assert_eq!(session.pieces(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.period(), INITIAL_PERIOD);
        let active = session.active().unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn test_tick_moves_one_cell_along_direction() {
        let mut session = GameSession::new(1);
        place(&mut session, PieceKind::T, 8, 8, Direction::Left);
        assert_eq!(session.tick(), Phase::Falling);
        assert_eq!(session.active().unwrap().x, 7);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn test_step_walks_through_every_phase() {
        let mut session = GameSession::new(1);
        // O against the bottom wall: rows 18..=19.
        place(&mut session, PieceKind::O, 0, 18, Direction::Down);

        assert_eq!(session.step(), Phase::Locking);
        assert_eq!(session.step(), Phase::Clearing);
        assert!(session.active().is_none());
        assert_eq!(session.board().filled_count(), 4);
        assert_eq!(session.step(), Phase::Spawning);
        assert_eq!(session.step(), Phase::Falling);
        assert_eq!(session.pieces(), 2);
    }

    #[test]
    fn test_lock_writes_color_id() {
        let mut session = GameSession::new(1);
        place(&mut session, PieceKind::O, 0, 18, Direction::Down);
        session.tick();
        let grid = session.snapshot_board();
        assert_eq!(grid[18][1], PieceKind::O.color_id());
        assert_eq!(grid[19][2], PieceKind::O.color_id());
        assert_eq!(grid[18][0], 0);

        let ev = session.take_last_event().unwrap();
        assert_eq!(ev.kind, PieceKind::O);
        assert_eq!(ev.lines_cleared(), 0);
        assert_eq!(ev.score_delta, 0);
        assert!(session.take_last_event().is_none());
    }

    #[test]
    fn test_filling_last_gap_clears_row_and_scores() {
        let mut board = Board::new();
        for x in 0..20 {
            if x != 5 {
                board.set(x, 10, Some(PieceKind::J));
            }
        }
        board.set(3, 14, Some(PieceKind::J));
        let mut session = GameSession::from_board(board, 11);
        // T pointing down: (4,9) (5,9) (6,9) above, (5,10) in the gap.
        session.set_active(Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 4,
            y: 8,
            direction: Direction::Down,
        });

        session.tick();

        let grid = session.snapshot_board();
        assert!(grid[10].iter().all(|&v| v == 0));
        assert_eq!(grid[9][4], PieceKind::T.color_id());
        // The lower half sinks toward the bottom edge.
        assert_eq!(grid[14][3], 0);
        assert_eq!(grid[19][3], PieceKind::J.color_id());
        assert_eq!(session.score(), 100);
        assert!(session.period() < INITIAL_PERIOD);

        let ev = session.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 1);
        assert_eq!(ev.cols_cleared, 0);
        assert_eq!(ev.pivot_row, Some(10));
        assert_eq!(ev.score_delta, 100);
        assert!(ev.gravity_frames > 0);
        assert_eq!(ev.period, session.period());
    }

    #[test]
    fn test_one_lock_completing_row_and_column_scores_300() {
        let mut board = Board::new();
        for y in 0..20 {
            if y != 15 {
                board.set(12, y, Some(PieceKind::L));
            }
        }
        for x in 0..20 {
            if !(12..16).contains(&x) {
                board.set(x, 15, Some(PieceKind::L));
            }
        }
        let mut session = GameSession::from_board(board, 5);
        // Flat I filling (12..=15, 15), blocked below by column 12.
        session.set_active(Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 12,
            y: 14,
            direction: Direction::Down,
        });

        session.tick();

        assert_eq!(session.score(), 300);
        assert_eq!(session.board().filled_count(), 0);
        let ev = session.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 1);
        assert_eq!(ev.cols_cleared, 1);
        assert_eq!(ev.pivot_row, Some(15));
        assert_eq!(ev.pivot_col, Some(12));
        assert_eq!(ev.score_delta, 300);
    }

    #[test]
    fn test_rotate_only_while_falling() {
        let mut session = GameSession::new(1);
        place(&mut session, PieceKind::T, 8, 8, Direction::Down);
        assert!(session.request_rotate());
        assert_eq!(session.active().unwrap().rotation, Rotation::East);

        place(&mut session, PieceKind::O, 0, 18, Direction::Down);
        session.step();
        assert_eq!(session.phase(), Phase::Locking);
        assert!(!session.request_rotate());
    }

    #[test]
    fn test_direction_priority_within_interval() {
        let mut session = GameSession::new(1);
        place(&mut session, PieceKind::T, 8, 8, Direction::Down);

        session.request_direction(Direction::Right);
        assert_eq!(
            session.request_direction(Direction::Left),
            Some(Direction::Right)
        );
        session.end_input_interval();

        assert_eq!(
            session.request_direction(Direction::Left),
            Some(Direction::Left)
        );
        assert_eq!(session.request_direction(Direction::Up), Some(Direction::Left));
    }

    #[test]
    fn test_reset_only_after_game_over() {
        let mut session = GameSession::new(3);
        assert!(!session.reset(4));
        assert_eq!(session.seed(), 3);

        let mut blocked = Board::new();
        for y in 8..12 {
            for x in 8..12 {
                blocked.set(x, y, Some(PieceKind::Z));
            }
        }
        let mut over = GameSession::from_board(blocked, 3);
        assert!(over.is_game_over());
        assert!(over.reset(4));
        assert!(!over.is_game_over());
        assert_eq!(over.seed(), 4);
        assert_eq!(over.board().filled_count(), 0);
    }

    #[test]
    fn test_game_over_ignores_ticks_and_input() {
        let mut blocked = Board::new();
        for y in 0..20 {
            for x in 0..20 {
                if (x + y) % 2 == 0 {
                    blocked.set(x, y, Some(PieceKind::I));
                }
            }
        }
        let mut session = GameSession::from_board(blocked.clone(), 9);
        assert!(session.is_game_over());
        assert_eq!(session.tick(), Phase::GameOver);
        assert_eq!(session.ticks(), 0);
        assert!(!session.request_rotate());
        assert_eq!(session.request_direction(Direction::Up), None);
        assert_eq!(session.board(), &blocked);
    }

    #[test]
    fn test_period_never_rises_and_respects_floor() {
        let mut session = GameSession::new(5);
        session.board_mut().clear();
        let mut last = session.period();
        for _ in 0..60 {
            // Complete row 19 except column 0 and drop a vertical I into it.
            for x in 1..20 {
                session.board_mut().set(x, 19, Some(PieceKind::L));
            }
            session.set_active(Tetromino {
                kind: PieceKind::I,
                rotation: Rotation::East,
                x: -2,
                y: 16,
                direction: Direction::Down,
            });
            session.tick();
            assert!(session.period() <= last);
            assert!(session.period() >= PERIOD_FLOOR);
            last = session.period();
            session.board_mut().clear();
            if session.is_game_over() {
                break;
            }
        }
        assert_eq!(session.period(), PERIOD_FLOOR);
    }
}
