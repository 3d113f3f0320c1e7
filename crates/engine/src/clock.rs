//! Tick sources.
//!
//! A [`Clock`] decides when the session advances. The driver publishes every
//! period change back to it, so a clock always runs at the session's speed.

use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::types::INITIAL_PERIOD;

/// Source of movement ticks
pub trait Clock {
    /// Consume one due tick, if any
    fn poll_tick(&mut self) -> bool;

    /// Adopt a new period
    fn set_period(&mut self, period: u32);
}

/// Ticks only when told to; used by tests and headless simulation.
#[derive(Debug, Clone)]
pub struct ManualClock {
    pending: u32,
    period: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            pending: 0,
            period: INITIAL_PERIOD,
        }
    }

    /// Queue one tick
    pub fn fire(&mut self) {
        self.fire_n(1);
    }

    pub fn fire_n(&mut self, n: u32) {
        self.pending = self.pending.saturating_add(n);
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Last period published by the driver
    pub fn period(&self) -> u32 {
        self.period
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn poll_tick(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    fn set_period(&mut self, period: u32) {
        self.period = period;
    }
}

/// Wall-clock ticks paced by [`EngineConfig::tick_interval`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    config: EngineConfig,
    interval: Duration,
    last_tick: Instant,
}

impl SystemClock {
    pub fn new(config: EngineConfig) -> Self {
        let interval = config.tick_interval(INITIAL_PERIOD);
        Self {
            config,
            interval,
            last_tick: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next tick is due
    pub fn time_until_tick(&self) -> Duration {
        self.interval
            .checked_sub(self.last_tick.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Restart the interval from now
    pub fn restart(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Clock for SystemClock {
    fn poll_tick(&mut self) -> bool {
        if self.last_tick.elapsed() < self.interval {
            return false;
        }
        self.last_tick = Instant::now();
        true
    }

    fn set_period(&mut self, period: u32) {
        self.interval = self.config.tick_interval(period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_counts_fired_ticks() {
        let mut clock = ManualClock::new();
        assert!(!clock.poll_tick());
        clock.fire_n(2);
        assert!(clock.poll_tick());
        assert!(clock.poll_tick());
        assert!(!clock.poll_tick());
    }

    #[test]
    fn test_manual_clock_records_period() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.period(), INITIAL_PERIOD);
        clock.set_period(5_000);
        assert_eq!(clock.period(), 5_000);
    }

    #[test]
    fn test_system_clock_tracks_period() {
        let config = EngineConfig {
            min_step_ms: 1,
            ..EngineConfig::default()
        };
        let mut clock = SystemClock::new(config.clone());
        assert_eq!(clock.interval(), config.tick_interval(INITIAL_PERIOD));
        clock.set_period(100_000);
        assert_eq!(clock.interval(), config.tick_interval(100_000));
        assert!(clock.time_until_tick() <= clock.interval());
    }

    #[test]
    fn test_system_clock_not_due_immediately() {
        let mut clock = SystemClock::new(EngineConfig::default());
        // 600 ms interval at the initial period.
        assert!(!clock.poll_tick());
    }
}
