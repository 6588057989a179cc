// 📝 Logging setup
//
// The TUI owns the terminal, so it only logs when ARR_LOG_DIR points at a
// directory. The server and export commands log to stderr.

use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Environment variable naming the log directory for the TUI
pub const LOG_DIR_ENV: &str = "ARR_LOG_DIR";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`)
pub fn init_stderr(app_name: &'static str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    tracing::debug!(application = app_name, "logging to stderr");
}

/// Log to `<ARR_LOG_DIR>/<app>.log` when the variable is set; otherwise stay silent.
///
/// Returns whether a subscriber was installed.
pub fn init_file(app_name: &'static str) -> bool {
    let Some(dir) = std::env::var_os(LOG_DIR_ENV) else {
        return false;
    };
    let dir = std::path::PathBuf::from(dir);
    if std::fs::create_dir_all(&dir).is_err() {
        return false;
    }

    let appender = tracing_appender::rolling::never(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .is_ok()
}
