//! Core error types for jotbook-core.
//!
//! Validation failures (`EmptyMessage`, `IndexOutOfRange`) are always raised
//! before anything touches the disk. I/O failures carry the path involved so
//! the CLI can report them without extra context.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by journal storage and mutation.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Message was blank after trimming
    #[error("Message is empty")]
    EmptyMessage,

    /// Index outside `[0, len)`
    #[error("Index {index} out of range (journal has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },

    /// Undo requested but no backup slot exists
    #[error("No backup available at {}", path.display())]
    NoBackup { path: PathBuf },

    /// Copying the journal into its backup slot failed
    #[error("Failed to back up {}: {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other read/write failure on the journal file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Journal name cannot be turned into a file inside the journals directory
    #[error("Invalid journal name: {0}")]
    InvalidJournalName(String),

    /// Data directory could not be determined or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

impl JournalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JournalError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {}: {message}", path.display())]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {}: {message}", path.display())]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Data directory could not be resolved
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for JournalError
pub type Result<T, E = JournalError> = std::result::Result<T, E>;
