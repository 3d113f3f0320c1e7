//! Terminal runner (default binary).
//!
//! Keyboard in, framebuffer out. Logs go to `QUADFALL_LOG_PATH` when set,
//! since stdout belongs to the game.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use quadfall::core::{GameSession, GameSnapshot};
use quadfall::engine::{Driver, EngineConfig, SystemClock};
use quadfall::input::KeyboardInput;
use quadfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use quadfall::types::POLL_MS;

/// Pause between gravity animation frames
const GRAVITY_FRAME: Duration = Duration::from_millis(15);

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");

    let clock = SystemClock::new(config);
    let mut driver = Driver::new(GameSession::new(seed), KeyboardInput::new(), clock);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_viewport = viewport();

    driver.snapshot_into(&mut snap);
    view.render_into(&snap, last_viewport, &mut fb);
    term.draw(&fb)?;

    loop {
        let mut frame_err = None;
        let report = driver.poll_with(|board| {
            if frame_err.is_some() {
                return;
            }
            board.write_u8_grid(&mut snap.board);
            snap.active = None;
            view.render_into(&snap, last_viewport, &mut fb);
            match term.draw(&fb) {
                Ok(()) => std::thread::sleep(GRAVITY_FRAME),
                Err(e) => frame_err = Some(e),
            }
        })?;
        if let Some(e) = frame_err {
            return Err(e);
        }
        if report.quit {
            info!(score = driver.session().score(), "quit");
            return Ok(());
        }

        let vp = viewport();
        if report.changed() || vp != last_viewport {
            if vp != last_viewport {
                term.invalidate();
                last_viewport = vp;
            }
            driver.snapshot_into(&mut snap);
            view.render_into(&snap, last_viewport, &mut fb);
            term.draw(&fb)?;
        }

        // Wake for the next key or the next tick, whichever comes first.
        let wait = driver
            .clock()
            .time_until_tick()
            .min(Duration::from_millis(POLL_MS as u64));
        crossterm::event::poll(wait)?;
    }
}
