//! main.rs
//! Entry point for reel

use reel_tui::config::Config;
use reel_tui::core::terminal;
use reel_tui::logging;
use reel_tui::utils::cli::{CliAction, handle_args};
use reel_tui::utils::resolve_input_path;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        tracing::error!(panic = %info, "reel panicked");
        eprintln!("\n[reel] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let overrides = match handle_args() {
        CliAction::RunApp(overrides) => overrides,
        CliAction::Exit => return Ok(()),
    };

    let _log_guard = logging::init();

    let mut config = Config::load();
    overrides.apply(&mut config);

    let cwd = std::env::current_dir()?;
    let start_dir = match &overrides.path {
        Some(path_arg) => {
            let target = resolve_input_path(path_arg, &cwd);
            if !target.is_dir() {
                eprintln!("\n[reel] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
            target
        }
        None => cwd,
    };

    terminal::run_terminal(&config, &start_dir)
}
