//! Process-wide logger setup: console sink plus a per-run log file

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::color::ColorMode;
use crate::format::{ConsoleFormat, FileFormat};

pub type RegistryBox = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Errors raised while setting up logging
#[derive(Error, Debug)]
pub enum LogError {
    /// Current directory could not be resolved for the default log location
    #[error("cannot resolve working directory: {0}")]
    WorkingDir(#[from] std::io::Error),

    /// Log file could not be created or opened
    #[error("cannot open log file {}: {message}", path.display())]
    File {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// A global subscriber is already installed
    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// Thresholds and location for the two sinks
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level written to the console
    pub console_level: LevelFilter,
    /// Minimum level written to the log file
    pub file_level: LevelFilter,
    /// Directory for the log file; `None` means the working directory
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::INFO,
            file_level: LevelFilter::DEBUG,
            directory: None,
        }
    }
}

/// What `init` set up
#[derive(Debug, Clone)]
pub struct LogSession {
    /// Path of this run's log file
    pub path: PathBuf,
    /// Color decision for the console sink
    pub color: ColorMode,
}

/// File name of the log for a run started at `started`
#[must_use]
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("{}.log", log_file_stem(started))
}

/// Full path of the log for a run started at `started`
#[must_use]
pub fn log_file_path(directory: &Path, started: DateTime<Local>) -> PathBuf {
    directory.join(log_file_name(started))
}

fn log_file_stem(started: DateTime<Local>) -> String {
    format!("deployment-{}", started.format("%Y%m%d-%H%M%S"))
}

/// Open the log file for this run in append mode
///
/// # Errors
/// Returns `LogError::File` if the directory or file cannot be created
pub fn open_log_file(
    directory: &Path,
    started: DateTime<Local>,
) -> Result<RollingFileAppender, LogError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file_stem(started))
        .filename_suffix("log")
        .build(directory)
        .map_err(|e| LogError::File {
            path: log_file_path(directory, started),
            message: e.to_string(),
        })
}

/// Console and file layers with independent thresholds and formats
pub fn layers<C, F>(config: &LogConfig, color: ColorMode, console: C, file: F) -> RegistryBox
where
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat::new(color))
        .with_writer(console)
        .with_filter(config.console_level);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(FileFormat::new())
        .with_ansi(false) // Disable colors for file
        .with_writer(file)
        .with_filter(config.file_level);

    console_layer.and_then(file_layer).boxed()
}

/// Install the global subscriber: stdout console plus the run's log file
///
/// Must run before the first event; a second call fails.
///
/// # Errors
/// Returns `LogError` if the log file cannot be opened or a subscriber is
/// already installed
pub fn init(config: &LogConfig, started: DateTime<Local>) -> Result<LogSession, LogError> {
    let directory = match &config.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let file = open_log_file(&directory, started)?;
    let color = ColorMode::detect();

    tracing_subscriber::registry()
        .with(layers(config, color, std::io::stdout, file))
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)?;

    Ok(LogSession {
        path: log_file_path(&directory, started),
        color,
    })
}
