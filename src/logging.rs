//! Logging setup for the command line tool.
//!
//! Installs a global tracing subscriber that writes to stderr and appends to a
//! log file. Both sinks share the same timestamp format and level filter.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, UtcOffset};
use tracing::level_filters::LevelFilter;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Log file written to the working directory when none is given.
pub const DEFAULT_LOG_FILE: &str = "rename_files.log";

const DISPLAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file path has no file name component.
    #[error("Invalid log file path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Failed to create or open the log file.
    #[error("Failed to open log file at {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file appender could not be built.
    #[error("Failed to create log file appender: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing to write to stderr and append to `log_file`.
///
/// The returned guard flushes the file writer when dropped, so the caller must
/// keep it alive for the whole run.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init(level: LevelFilter, log_file: &Path) -> Result<WorkerGuard, LoggingError> {
    // Resolve the offset before the writer thread is spawned.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let (log_dir, log_file_name) = split_log_path(log_file)?;
    ensure_file_exists(log_file)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file_name)
        .build(&log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());
    let console_layer = fmt::layer()
        .with_target(false)
        .with_timer(build_timer(offset))
        .with_writer(std::io::stderr);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(build_timer(offset))
        .with_writer(file_writer);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(log_file = %log_file.display(), "Logging initialized");
    Ok(guard)
}

/// Current local time (UTC when the offset is unknown) in log format.
#[must_use]
pub fn timestamp_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(DISPLAY_FORMAT).unwrap_or_else(|_| at.to_string())
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_string()))
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn build_timer(
    offset: UtcOffset,
) -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}
