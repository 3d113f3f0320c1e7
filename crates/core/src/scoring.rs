//! Scoring module - line-clear points and the score-to-period feedback loop
//!
//! Points come from a four-tier table keyed by the number of lines (rows plus
//! columns) one lock cleared. After the points are added, a period still above
//! the floor is cut by `score * PERIOD_STEP * tier`. The cut grows with the
//! running score, so the period collapses to the floor within a handful of
//! clears; that curve is intentional and left as is.

use crate::types::{LINE_SCORES, PERIOD_FLOOR, PERIOD_STEP};

/// Outcome of one lock event's scoring update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points added by this clear
    pub points: u32,
    /// Running score after the points
    pub score: u32,
    /// Period to publish to the clock
    pub period: u32,
}

/// Tier (1..=4) for a clear; zero means nothing cleared.
///
/// Five or more simultaneous lines score as four.
pub fn tier(lines: u32) -> u32 {
    lines.min(4)
}

/// Calculate line clear points
pub fn calculate_line_score(lines: u32) -> u32 {
    LINE_SCORES[tier(lines) as usize]
}

/// Next period given the already-updated score
pub fn next_period(period: u32, score: u32, lines: u32) -> u32 {
    let tier = tier(lines);
    if tier == 0 || period <= PERIOD_FLOOR {
        return period;
    }
    let cut = score as u64 * PERIOD_STEP as u64 * tier as u64;
    (period as u64)
        .saturating_sub(cut)
        .max(PERIOD_FLOOR as u64) as u32
}

/// Apply one lock event's clear to the running score and period
pub fn calculate_score(lines: u32, score: u32, period: u32) -> ScoreResult {
    let points = calculate_line_score(lines);
    let score = score.saturating_add(points);
    ScoreResult {
        points,
        score,
        period: next_period(period, score, lines),
    }
}
