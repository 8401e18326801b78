//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level. When a log file is
//! configured, output goes there instead of stdout and ANSI colours are off.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `gateway_routing=debug,info`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Append to this file instead of writing to stdout
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Create a configuration with the given level
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Use JSON output
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Write to a file
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The level directive could not be parsed
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Offending directive
        directive: String,
        /// Parser message
        message: String,
    },

    /// The log file could not be opened
    #[error("Failed to open log file {path}: {source}")]
    File {
        /// Log file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Build the filter, preferring `RUST_LOG` when it is set and valid
///
/// # Errors
/// Returns an error if `RUST_LOG` is unusable and `level` does not parse
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
            directive: level.to_string(),
            message: e.to_string(),
        })
    })
}

/// Install the global subscriber
///
/// # Errors
/// Returns an error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(&config.level)?;

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::File {
                    path: path.clone(),
                    source,
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stdout), true),
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    info!(
        level = %config.level,
        json = config.json,
        file = ?config.file,
        "Logging initialized"
    );

    Ok(())
}
