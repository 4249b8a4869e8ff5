use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "PINYIN_DRILL_LOG";

/// Keeps the background log writer alive; drop it on exit to flush.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Log to a daily file under `log_dir`. The terminal belongs to the UI, so
/// nothing is written to stdout/stderr. Returns `None` if the directory
/// cannot be created or a subscriber is already installed.
pub fn init_file_logging(log_dir: &Path) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if fs::create_dir_all(log_dir).is_err() {
        return None;
    }
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "pinyin-drill.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(FileLogGuard { _guard: guard })
}
