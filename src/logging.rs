//! Tracing setup for applications embedding the injector.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use crate::theme::logs_dir;

/// Timestamp format used in log lines.
struct InjectorTimer;

impl tracing_subscriber::fmt::time::FormatTime for InjectorTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"))
    }
}

/// Keeps the non-blocking writer flushing for the life of the process.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Log file name inside the log directory.
pub const LOG_FILE: &str = "css-injector.log";

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `log_dir`: Directory for `css-injector.log`.
///
/// Output:
/// - `true` when this call installed a subscriber writing to the file.
/// - `false` when the file could not be opened (stderr is used instead) or a
///   global subscriber was already installed.
///
/// Details:
/// - Level comes from `RUST_LOG`, defaulting to `info`.
/// - A second call is harmless: the existing subscriber stays in place.
#[must_use]
pub fn init_logging(log_dir: &Path) -> bool {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    let log_path = log_dir.join(LOG_FILE);
    let _ = std::fs::create_dir_all(log_dir);
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(InjectorTimer)
                .try_init()
                .is_ok();
            if installed {
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "logging initialized");
            }
            installed
        }
        Err(e) => {
            // Fallback: stderr so the host application still starts
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_timer(InjectorTimer)
                .try_init()
                .is_ok();
            if installed {
                tracing::warn!(error = %e, "failed to open log file; using stderr");
            }
            false
        }
    }
}

/// What: Install the global tracing subscriber writing to the default logs directory.
///
/// Output:
/// - Same as [`init_logging`], for `$XDG_STATE_HOME/css-injector/logs`.
#[must_use]
pub fn init_default_logging() -> bool {
    init_logging(&logs_dir())
}
