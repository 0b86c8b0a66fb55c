use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};

use crate::config::Config;

// Flushes the background writer when dropped, so it lives as long as the process.
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Install a file logger that rolls daily under `config.log_dir`.
///
/// Only the first call has any effect. If the host application already set a
/// global subscriber, that one is kept.
pub fn init(config: &Config) {
    LOG_GUARD.get_or_init(|| {
        let file_appender = rolling::daily(&config.log_dir, &config.log_file);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let installed = tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_max_level(config.log_level)
            .with_ansi(false)
            .with_target(false) // removes module path
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .try_init();

        if installed.is_ok() {
            tracing::info!(dir = %config.log_dir, file = %config.log_file, "Attendance logging started");
        }
        guard
    });
}

/// Logger for tests: debug level, captured by the test harness.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
