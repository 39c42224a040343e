// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StalecheckError {
    /// A pattern or config value that can never be valid (e.g. a relative
    /// glob). Not a transient condition.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid glob pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A filesystem call on a specific path failed (removal, stat, listing).
    #[error("Filesystem error at {path:?}: {source}")]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl StalecheckError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StalecheckError::FilesystemError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StalecheckError>;
