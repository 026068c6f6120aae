//! Terminal Blockfall runner (default binary).
//!
//! Fixed-rate tick loop: input is polled with the time left until the next tick
//! and forwarded to the engine as soon as it arrives.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::cli::{parse_args, HostArgs, USAGE};
use blockfall::engine::GameEngine;
use blockfall::input::{map_key_event, should_quit};
use blockfall::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::TICK_US;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let host = parse_args(&args)?;
    if host.help {
        println!("{}", USAGE);
        return Ok(());
    }
    init_logging(&host)?;

    let mut engine = GameEngine::new(host.config.clone())?;
    for &kind in &host.presets {
        engine.push_preset(kind);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    if host.dump_final {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }
    Ok(())
}

/// Plain-text tracing output to the requested file; nothing otherwise
fn init_logging(host: &HostArgs) -> Result<()> {
    let Some(path) = &host.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &mut GameEngine) -> Result<()> {
    engine.start();
    info!(config = ?engine.config(), "game started");

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick_duration = Duration::from_micros(TICK_US);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&engine.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(command) = map_key_event(key, engine.phase()) {
                        engine.handle_command(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick += tick_duration;
            // Do not try to catch up after a long stall
            if last_tick.elapsed() > tick_duration {
                last_tick = Instant::now();
            }
            engine.tick();
            if let Some(event) = engine.take_last_event() {
                if event.lines_cleared() > 0 {
                    info!(lines = event.lines_cleared(), "lines cleared");
                }
            }
        }
    }
}
