//! Headless batch runner.
//!
//! Plays seeded sessions with a random steering policy and writes one JSON
//! line per game plus a summary line. Useful for checking determinism and
//! for eyeballing how fast the period collapses.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use quadfall::core::GameSession;
use quadfall::engine::{Driver, InputSample, InputSource, ManualClock};
use quadfall::types::Direction;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Seed of the first game; game `i` uses `seed + i`
    #[arg(long, default_value_t = 1)]
    seed: u32,
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: u32,
    /// Stop a game that has not ended after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Average number of polls between random control changes (0 = never steer)
    #[arg(long, default_value_t = 4)]
    steer_every: u32,
    /// Write results here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Random switch flips and button presses from a seeded generator
struct RandomInput {
    rng: StdRng,
    steer_every: u32,
    current: InputSample,
}

impl RandomInput {
    fn new(seed: u64, steer_every: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            steer_every,
            current: InputSample::default(),
        }
    }
}

impl InputSource for RandomInput {
    fn sample(&mut self) -> io::Result<InputSample> {
        // Release the button after every press so each press is an edge.
        self.current.rotate = false;
        if self.steer_every == 0 || self.rng.random_range(0..self.steer_every) != 0 {
            return Ok(self.current);
        }
        if self.rng.random_bool(0.5) {
            self.current.rotate = true;
        } else {
            let d = Direction::from_index(self.rng.random_range(0..4));
            self.current = self.current.with_switch(d, !self.current.switch(d));
        }
        Ok(self.current)
    }
}

#[derive(Debug, Clone, Serialize)]
struct GameResult {
    seed: u32,
    score: u32,
    lines: u32,
    pieces: u32,
    ticks: u64,
    period: u32,
    game_over: bool,
    rotations: u32,
    best_clear: u32,
    gravity_frames: u32,
}

#[derive(Debug, Clone, Serialize)]
struct Summary {
    games: u32,
    game_overs: u32,
    mean_score: f64,
    max_score: u32,
    mean_pieces: f64,
    total_lines: u64,
}

fn play(seed: u32, cli: &Cli) -> GameResult {
    let input = RandomInput::new(seed as u64, cli.steer_every);
    let mut driver = Driver::new(GameSession::new(seed), input, ManualClock::new());

    let mut rotations = 0;
    let mut best_clear = 0;
    let mut gravity_frames = 0;

    while !driver.session().is_game_over() && driver.session().ticks() < cli.max_ticks {
        driver.clock_mut().fire();
        let report = match driver.poll() {
            Ok(report) => report,
            // RandomInput never fails.
            Err(_) => break,
        };
        rotations += report.rotated as u32;
        if let Some(event) = driver.session_mut().take_last_event() {
            best_clear = best_clear.max(event.lines_cleared());
            gravity_frames += event.gravity_frames;
            if event.lines_cleared() > 0 {
                debug!(
                    seed,
                    lines = event.lines_cleared(),
                    score_delta = event.score_delta,
                    period = event.period,
                    "clear"
                );
            }
        }
    }

    let s = driver.session();
    GameResult {
        seed,
        score: s.score(),
        lines: s.lines(),
        pieces: s.pieces(),
        ticks: s.ticks(),
        period: s.period(),
        game_over: s.is_game_over(),
        rotations,
        best_clear,
        gravity_frames,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();

    let mut out: Box<dyn Write> = match &cli.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let mut results = Vec::with_capacity(cli.games as usize);
    for i in 0..cli.games {
        let seed = cli.seed.wrapping_add(i);
        let result = play(seed, &cli);
        info!(
            seed,
            score = result.score,
            ticks = result.ticks,
            game_over = result.game_over,
            "game finished"
        );
        serde_json::to_writer(&mut out, &result)?;
        writeln!(out)?;
        results.push(result);
    }

    let n = results.len().max(1) as f64;
    let summary = Summary {
        games: cli.games,
        game_overs: results.iter().filter(|r| r.game_over).count() as u32,
        mean_score: results.iter().map(|r| r.score as f64).sum::<f64>() / n,
        max_score: results.iter().map(|r| r.score).max().unwrap_or(0),
        mean_pieces: results.iter().map(|r| r.pieces as f64).sum::<f64>() / n,
        total_lines: results.iter().map(|r| r.lines as u64).sum(),
    };
    serde_json::to_writer(&mut out, &serde_json::json!({ "summary": summary }))?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
