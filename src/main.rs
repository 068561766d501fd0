//! Terminal stacker runner (default binary).
//!
//! Drives the engine from a wall-clock [`FrameClock`], maps crossterm key events
//! to commands and paints the engine's canvas through the framebuffer renderer.

mod cli;
mod logging;

use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use log::{debug, info};

use tui_stacker::core::{CellCanvas, Engine, EngineSnapshot, FrameClock};
use tui_stacker::input::{command_for, should_quit};
use tui_stacker::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let settings = cli::Args::parse().resolve()?;
    if let Some(path) = &settings.log_file {
        logging::init_log(settings.log_level, path)?;
    }

    // Put the terminal back before the panic message is printed.
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );
        eprint!("{panic_info}\n\n");
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, settings: cli::Settings) -> Result<()> {
    let clock = FrameClock::new(settings.frame);
    let mut engine: Engine<FrameClock> =
        Engine::new(settings.engine, clock).with_renderer(CellCanvas::new());
    info!(
        "seed {}, frame period {:?}",
        engine.seed(),
        engine.scheduler().period()
    );

    engine.on_start(|| debug!("start event"));
    engine.on_game_over(|| debug!("game over event"));
    engine.on_score_change(|score| debug!("score event: {}", score));

    let view = GameView::default();
    let blank = CellCanvas::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = EngineSnapshot::default();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            engine.snapshot_into(&mut snapshot);
            // Nothing is painted until the first tick after a start.
            let canvas = engine
                .renderer()
                .filter(|canvas| canvas.frames() > 0)
                .unwrap_or(&blank);
            view.render_into(canvas, &HudView::from(&snapshot), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = engine.scheduler().time_until_due(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        engine.stop();
                        return Ok(());
                    }
                    if let Some(command) = command_for(key) {
                        dirty |= engine.apply(command);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if let Some((handle, now_ms)) = engine.scheduler_mut().due(Instant::now()) {
            dirty |= engine.on_tick(handle, now_ms);
        }
    }
}
