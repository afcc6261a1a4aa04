//! Terminal rendering and event loop for reel.
//!
//! Handles setup/teardown of raw mode and the alternate screen. Terminal events are
//! read on their own thread so the loop can block on one `select!` over input and
//! background updates: a key or a resize always redraws, updates redraw when they
//! say so, and updates that piled up meanwhile are folded into the same redraw.

use crate::app::{AppState, KeypressResult};
use crate::config::Config;
use crate::ui::surface::FrameSurface;

use crossbeam_channel::{Receiver, select, unbounded};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::path::Path;
use std::thread;

/// Opens `start_dir`, takes over the terminal and runs the main event loop.
///
/// Blocks until quit. Returns an std::io::Error if the directory cannot be opened or
/// terminal setup or teardown fails.
pub fn run_terminal(config: &Config, start_dir: &Path) -> io::Result<()> {
    let size = terminal::size()?;
    let mut app = AppState::new(config, start_dir, size).map_err(io::Error::other)?;
    tracing::info!(dir = %start_dir.display(), width = size.0, height = size.1, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, spawn_input_reader());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    tracing::info!("stopped");
    result
}

/// Forwards terminal events until reading fails or the loop is gone.
fn spawn_input_reader() -> Receiver<Event> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "reading terminal input failed");
                    break;
                }
            }
        }
    });
    rx
}

/// What the loop does after one wakeup.
enum Step {
    Redraw,
    Idle,
    Quit,
}

/// Main event loop of reel: waits for input or updates, dispatches them to the app
/// and redraws. Returns on quit.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState<'_>,
    input_rx: Receiver<Event>,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let update_rx = app.update_rx().clone();
    terminal.draw(|f| app.draw(&mut FrameSurface::new(f)))?;

    loop {
        let step = select! {
            recv(input_rx) -> event => match event {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    match app.handle_keypress(key) {
                        KeypressResult::Quit => Step::Quit,
                        KeypressResult::Continue => Step::Redraw,
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    app.resize(width, height);
                    Step::Redraw
                }
                Ok(_) => Step::Idle,
                // input thread died, nothing can reach the app anymore
                Err(_) => Step::Quit,
            },
            recv(update_rx) -> update => match update {
                Ok(update) => {
                    if app.handle_update(update) {
                        Step::Redraw
                    } else {
                        Step::Idle
                    }
                }
                Err(_) => Step::Idle,
            },
        };

        match step {
            Step::Quit => break,
            Step::Idle => continue,
            Step::Redraw => {}
        }

        while let Ok(update) = update_rx.try_recv() {
            app.handle_update(update);
        }
        terminal.draw(|f| app.draw(&mut FrameSurface::new(f)))?;
    }
    Ok(())
}
