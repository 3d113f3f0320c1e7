//! Runtime configuration read from the environment.

use std::env;
use std::time::Duration;

use crate::types::{DEFAULT_CLOCK_HZ, DEFAULT_MIN_STEP_MS, DEFAULT_TIMEOUTS_PER_STEP};

/// Timing and session settings for a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Frequency the period counter runs at
    pub clock_hz: u32,
    /// Timer expirations that make up one movement tick
    pub timeouts_per_step: u32,
    /// Lower bound on the wall-clock interval between ticks
    pub min_step_ms: u32,
    /// Fixed seed for the first session; fresh entropy when `None`
    pub seed: Option<u32>,
    /// Log file for the terminal binary
    pub log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            timeouts_per_step: DEFAULT_TIMEOUTS_PER_STEP,
            min_step_ms: DEFAULT_MIN_STEP_MS,
            seed: None,
            log_path: None,
        }
    }
}

fn parse_positive(key: &str) -> Option<u32> {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|&v: &u32| v > 0)
}

impl EngineConfig {
    /// Create from `QUADFALL_*` environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let clock_hz = parse_positive("QUADFALL_CLOCK_HZ").unwrap_or(defaults.clock_hz);
        let timeouts_per_step =
            parse_positive("QUADFALL_TIMEOUTS_PER_STEP").unwrap_or(defaults.timeouts_per_step);
        let min_step_ms = parse_positive("QUADFALL_MIN_STEP_MS").unwrap_or(defaults.min_step_ms);

        let seed = env::var("QUADFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let log_path = env::var("QUADFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            clock_hz,
            timeouts_per_step,
            min_step_ms,
            seed,
            log_path,
        }
    }

    /// Wall-clock time between ticks at `period`.
    ///
    /// The counter fires after `period + 1` cycles and a tick takes
    /// `timeouts_per_step` firings.
    pub fn tick_interval(&self, period: u32) -> Duration {
        let cycles = (period as u64 + 1) * self.timeouts_per_step.max(1) as u64;
        let micros = cycles * 1_000_000 / self.clock_hz.max(1) as u64;
        Duration::from_micros(micros).max(Duration::from_millis(self.min_step_ms as u64))
    }
}
