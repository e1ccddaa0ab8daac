//! Core error types for fuelwatch-core.
//!
//! Run-level failures (config, snapshot loading, webhook delivery) bubble
//! up as [`CoreError`]. Per-row problems are [`RecordError`]s: they are
//! collected into the report summary instead of aborting the run.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fuelwatch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot / data source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Webhook delivery errors
    #[error("Delivery error: {0}")]
    Notify(#[from] NotifyError),

    /// A report chunk could not be delivered; earlier chunks were sent
    #[error("Delivery of message {index} of {total} failed: {source}")]
    Delivery {
        index: usize,
        total: usize,
        #[source]
        source: NotifyError,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised while reading a tabular snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read snapshot {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported snapshot format '{0}' (expected json or csv)")]
    UnsupportedFormat(String),

    #[error("Malformed snapshot {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// A single row that could not be turned into a report line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The remaining-time cell is not `"<days> days <hours> hours"`.
    #[error("Row {row} ('{name}'): malformed remaining time '{value}'")]
    MalformedRemaining {
        row: usize,
        name: String,
        value: String,
    },

    /// The formatted line would not fit in a message on its own.
    #[error("'{name}': line is {len} characters, message limit is {max}")]
    LineTooLong { name: String, len: usize, max: usize },
}

/// Webhook delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// No webhook URL configured
    #[error("Webhook URL not configured. Run `fuelwatch config set notify.webhook_url <url>`.")]
    NotConfigured,

    /// Webhook URL does not parse or uses the wrong scheme
    #[error("Invalid webhook URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Request never produced a response
    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Webhook error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    /// Failed to start the HTTP runtime
    #[error("Failed to start HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
