//! Diagnostic logging with tracing
//!
//! Logs go to a daily-rolling file so the labeling view is never drawn over.
//! The filter is read from `POINTLABEL_LOG` (e.g. `POINTLABEL_LOG=debug`),
//! defaulting to `info`, or `debug` with `--verbose`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "POINTLABEL_LOG";

const LOG_FILE_PREFIX: &str = "pointlabel.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter from `POINTLABEL_LOG`, falling back to `info` or `debug`
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber writing to `log_dir`.
///
/// Keep the returned guard alive until exit; dropping it flushes the log.
///
/// # Errors
///
/// Returns `LoggingError` if the directory cannot be created or a
/// subscriber is already installed.
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::Directory {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
