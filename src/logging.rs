use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Install the tracing subscriber with a non-blocking daily file appender.
///
/// Returns `None` when a subscriber is already installed or no log
/// directory can be created.
pub fn init(log_dir: Option<PathBuf>) -> Option<LoggingGuard> {
    let log_dir = log_dir
        .or_else(|| Some(std::env::temp_dir().join("outliner").join("logs")))
        .and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            Some(dir)
        })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "outliner.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outliner=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
