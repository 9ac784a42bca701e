//! Logging Infrastructure
//!
//! Structured logging setup for embedding shells and tools. The core
//! itself only emits `tracing` events; installing a subscriber is the
//! embedder's choice.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize console logging with the given filter directive
pub fn init_logger(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .init();
}

/// Initialize logging with daily-rolling file output in addition to the
/// console format settings
///
/// Falls back to console-only when the directory does not exist.
pub fn init_logger_with_file(level: &str, log_dir: &Path) {
    if log_dir.exists() {
        let file_appender = tracing_appender::rolling::daily(log_dir, "tally");
        tracing_subscriber::fmt()
            .with_env_filter(filter(level))
            .with_target(false)
            .with_ansi(false)
            .with_writer(file_appender)
            .init();
        return;
    }

    init_logger(level);
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
