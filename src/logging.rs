//! Logging configuration using tracing, to a file or stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the crate-scoped filter, falling back to `warn` on a bad level.
pub fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("chainhue={level}")).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize tracing.
///
/// With a path, logs go to that file through a non-blocking writer and the
/// returned guard must be held until exit so remaining logs are flushed.
/// Without a path, logs go to stderr and no guard is needed.
///
/// In debug builds, span enter/close events are logged for detailed tracing.
pub fn init_logging(log_path: Option<&Path>, level: &str) -> Option<WorkerGuard> {
    let filter = crate_filter(level);

    let Some(log_path) = log_path else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return None;
    };

    let parent = log_path.parent().unwrap_or(Path::new("."));
    let filename = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("chainhue.log"));

    let file_appender = tracing_appender::rolling::never(parent, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true);

    // Only add span events in debug builds (significant overhead in release)
    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(guard)
}
