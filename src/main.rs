//! Terminal Blockfall runner (default binary).
//!
//! crossterm supplies keys and the terminal size; the gravity clock is fed
//! wall-clock time between polls. Both feed the same session queue, which is
//! drained once per frame before drawing.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use tui_blockfall::config::Config;
use tui_blockfall::core::GameSnapshot;
use tui_blockfall::engine::Session;
use tui_blockfall::input::{handle_key_event, should_quit};
use tui_blockfall::logging;
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    logging::init(config.log_file.as_deref(), &config.log_filter)?;

    let game = config.new_game();
    tracing::info!(
        tick_ms = config.tick_ms,
        seed = ?config.seed,
        probe = ?game.spawn_probe(),
        "starting"
    );

    let mut session = Session::new(game, config.tick_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.shutdown();

    if let Err(err) = &result {
        tracing::error!(%err, "session ended with an error");
    } else {
        tracing::info!(
            applied = session.applied(),
            locked = session.game().pieces_locked(),
            "session closed"
        );
    }
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last = Instant::now();

    loop {
        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        // A full queue drops the key; the session logs it.
                        let _ = session.submit(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        // Ticks past the queue capacity stay owed by the clock.
        session.advance_clock(now.duration_since(last));
        last = now;
        session.pump();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;
    }
}
