//! Logging and tracing utilities

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with console output and sensible defaults.
///
/// The filter is taken from `RUST_LOG` when set and falls back to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();
}

/// Initialize tracing into a daily-rolling log file under `log_dir`.
///
/// Nothing is written to the terminal, so interactive output stays clean.
/// Returns the worker guard for the background file writer. The caller must
/// keep it alive for the lifetime of the program; dropping it flushes and
/// shuts down the writer.
pub fn init_tracing_with_file(log_dir: impl AsRef<Path>, file_prefix: &str) -> WorkerGuard {
    let log_dir = log_dir.as_ref();
    let _ = std::fs::create_dir_all(log_dir);

    let appender = tracing_appender::rolling::daily(log_dir, file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}
