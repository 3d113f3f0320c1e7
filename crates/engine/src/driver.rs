//! Driver - glue between input, clock and session
//!
//! One [`Driver::poll`] is one pass of the game loop: sample the controls,
//! apply edges and switch changes, then tick if the clock says so. The
//! driver never sleeps; the caller decides how long to wait between polls.

use tracing::{debug, info};

use crate::clock::Clock;
use crate::core::{Board, GameSession, GameSnapshot, Phase};
use crate::input::{InputSample, InputSource};

/// What one poll did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    /// A rotation was committed
    pub rotated: bool,
    /// The session was restarted from game over
    pub restarted: bool,
    /// A tick ran and left the session in this phase
    pub ticked: Option<Phase>,
    /// The input asked to leave
    pub quit: bool,
}

impl PollReport {
    /// Whether anything visible may have changed
    pub fn changed(&self) -> bool {
        self.rotated || self.restarted || self.ticked.is_some()
    }
}

/// Owns a session and feeds it from an input source and a clock
pub struct Driver<I: InputSource, C: Clock> {
    session: GameSession,
    input: I,
    clock: C,
    prev: InputSample,
    // false until a sample has been taken as the baseline levels
    primed: bool,
    published_period: u32,
    reseed: fn() -> u32,
}

impl<I: InputSource, C: Clock> Driver<I, C> {
    pub fn new(session: GameSession, input: I, mut clock: C) -> Self {
        let published_period = session.period();
        clock.set_period(published_period);
        Self {
            session,
            input,
            clock,
            prev: InputSample::default(),
            primed: false,
            published_period,
            reseed: rand::random::<u32>,
        }
    }

    /// Replace the seed source used when restarting after game over
    pub fn with_reseed(mut self, reseed: fn() -> u32) -> Self {
        self.reseed = reseed;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
    }

    pub fn poll(&mut self) -> std::io::Result<PollReport> {
        self.poll_with(|_| {})
    }

    /// Like [`Driver::poll`], handing gravity animation frames to `on_frame`
    pub fn poll_with(&mut self, on_frame: impl FnMut(&Board)) -> std::io::Result<PollReport> {
        let sample = self.input.sample()?;
        let mut report = PollReport {
            quit: sample.quit,
            ..PollReport::default()
        };

        if self.primed {
            self.apply_sample(sample, &mut report);
        } else {
            // Switches already on when play starts only set the baseline.
            self.primed = true;
        }
        self.session.end_input_interval();
        self.prev = sample;

        if self.clock.poll_tick() {
            report.ticked = Some(self.session.tick_with(on_frame));
            self.publish_period();
        }

        Ok(report)
    }

    fn apply_sample(&mut self, sample: InputSample, report: &mut PollReport) {
        let rotate_edge = sample.rotate && !self.prev.rotate;
        let restart_edge = sample.restart && !self.prev.restart;

        if self.session.is_game_over() {
            if rotate_edge || restart_edge {
                let seed = (self.reseed)();
                report.restarted = self.session.reset(seed);
                if report.restarted {
                    info!(seed, "restarted");
                    self.publish_period();
                    // The new game starts from whatever the switches read now.
                    return;
                }
            }
        } else if rotate_edge {
            report.rotated = self.session.request_rotate();
        }

        for direction in sample.changed_since(&self.prev) {
            self.session.request_direction(direction);
        }
    }

    fn publish_period(&mut self) {
        let period = self.session.period();
        if period != self.published_period {
            debug!(period, "publishing period");
            self.published_period = period;
            self.clock.set_period(period);
        }
    }
}
