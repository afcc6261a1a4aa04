//! File logging for reel.
//!
//! The terminal belongs to the TUI, so events go to a daily rolling file under the
//! user cache directory. The level comes from `REEL_LOG` (defaults to `info`).

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Env var holding the tracing filter directives.
pub const LOG_ENV: &str = "REEL_LOG";

/// Directory the log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("reel")
}

/// Installs the global subscriber. Call once near the start of `main` and keep the
/// returned guard alive until exit so buffered lines are flushed.
///
/// Returns `None` when the log directory can't be created; reel runs fine without logs.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).ok()?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, "reel.log"));

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(guard)
}
