//! Logging setup shared by the ecgen binaries.
//!
//! Built on `tracing-subscriber`. Diagnostics go to stderr so generated
//! output on stdout stays clean; an optional log file gets a non-blocking
//! appender whose guards the caller must hold for the process lifetime.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level '{level}'")]
    InvalidLevel { level: String },

    /// The log file's parent directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed.
    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    level: String,
    stderr: bool,
    log_file: Option<PathBuf>,
}

impl LogConfig {
    /// Creates a config with `default_level`, honoring the `ECGEN_LOG`
    /// environment variable when set.
    #[must_use]
    pub fn from_env(default_level: &str) -> Self {
        let level = std::env::var("ECGEN_LOG").unwrap_or_else(|_| default_level.to_string());
        Self {
            level,
            stderr: false,
            log_file: None,
        }
    }

    /// Enables human-readable output on stderr.
    #[must_use]
    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    /// Overrides the level (e.g. when --verbose is passed).
    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    /// Adds a JSON log file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

/// Initializes the global subscriber.
///
/// Returns the appender guards; dropping them flushes and stops the
/// non-blocking file writer, so hold them until exit.
pub fn init_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|_| LoggingError::InvalidLevel {
        level: config.level.clone(),
    })?;

    let stderr_layer = config
        .stderr
        .then(|| fmt::layer().with_writer(io::stderr).with_target(false));

    let mut guards = Vec::new();
    let file_layer = match &config.log_file {
        Some(path) => {
            let appender = file_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);
            Some(fmt::layer().json().with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(guards)
}

fn file_appender(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender, LoggingError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let file_name = path
        .file_name()
        .map_or_else(|| "ecgen.log".into(), |name| name.to_os_string());
    Ok(tracing_appender::rolling::never(
        dir.unwrap_or_else(|| Path::new(".")),
        file_name,
    ))
}
