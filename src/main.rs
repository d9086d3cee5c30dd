//! Terminal merge puzzle runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_merge::term`.
//! Cascades are played back one pass every `CASCADE_STEP_MS` so merges can be
//! followed on screen.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use tui_merge::core::{Session, SessionConfig, SessionSnapshot, StepOutcome};
use tui_merge::input::{handle_key_event, should_quit, CursorController, Intent};
use tui_merge::term::{CursorView, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_merge::types::{CascadeState, CASCADE_STEP_MS, DEFAULT_GRID_SIZE, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "tui-merge", about = "Merge equal tiles on a square board")]
struct Args {
    /// Board edge length (at least 2)
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = SessionConfig::new(args.size, seed);
    let session = Session::new(config).context("failed to start session")?;
    info!("seed {seed}, size {}", args.size);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = GameView::default();
    let mut cursor = CursorController::new(session.size());
    cursor.reset(session.size());

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let tick = Duration::from_millis(u64::from(TICK_MS));
    let pass_delay = Duration::from_millis(u64::from(CASCADE_STEP_MS));
    let mut next_pass = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let (row, col) = cursor.position();
        let cursor_view = CursorView {
            row,
            col,
            held: cursor.held(),
        };
        view.render_into(&snap, &cursor_view, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    let Some(action) = handle_key_event(key) else {
                        continue;
                    };
                    match cursor.apply(action, &snap.cells, snap.move_cost) {
                        Some(Intent::Drop { source, target }) => {
                            if session.begin_drop(source, target)?.is_accepted() {
                                next_pass = Instant::now() + pass_delay;
                            }
                        }
                        Some(Intent::Miss) => session.miss(),
                        Some(Intent::Restart) => {
                            session.restart();
                            cursor.reset(session.size());
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if session.cascade_state() == CascadeState::Resolving && Instant::now() >= next_pass {
            if let StepOutcome::Merged(_) = session.step() {
                next_pass = Instant::now() + pass_delay;
            }
        }

        for ev in session.take_events() {
            debug!("{ev:?}");
        }
    }
}
