//! Sampled input.
//!
//! Inputs are levels, not events: a rotate button that is up or down and
//! four direction switches that are each on or off. The driver compares
//! consecutive samples to find rising edges and flipped switches.

use std::collections::VecDeque;
use std::io;

use crate::types::Direction;

/// One reading of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSample {
    /// Rotate button level
    pub rotate: bool,
    /// Direction switch levels, indexed by [`Direction::index`]
    pub switches: [bool; 4],
    /// Restart button level, only read once the game is over
    pub restart: bool,
    /// Leave the game loop
    pub quit: bool,
}

impl InputSample {
    pub fn switch(&self, direction: Direction) -> bool {
        self.switches[direction.index()]
    }

    pub fn with_switch(mut self, direction: Direction, on: bool) -> Self {
        self.switches[direction.index()] = on;
        self
    }

    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    /// Directions whose switch differs between `prev` and `self`
    pub fn changed_since(&self, prev: &InputSample) -> impl Iterator<Item = Direction> + '_ {
        let prev = prev.switches;
        Direction::ALL
            .into_iter()
            .filter(move |d| self.switches[d.index()] != prev[d.index()])
    }
}

/// Something that can be sampled without blocking
pub trait InputSource {
    fn sample(&mut self) -> io::Result<InputSample>;
}

/// Replays a fixed list of samples, then holds the last one.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputSample>,
    last: InputSample,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            queue: samples.into_iter().collect(),
            last: InputSample::default(),
        }
    }

    pub fn push(&mut self, sample: InputSample) {
        self.queue.push_back(sample);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> io::Result<InputSample> {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        Ok(self.last)
    }
}
