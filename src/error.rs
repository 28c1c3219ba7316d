//! Crate-wide error type

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for camtrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configs, indexing datasets or scoring outputs
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Named configuration could not be located
    #[error("Configuration not found: {name} (searched {searched:?})")]
    ConfigNotFound { name: String, searched: Vec<PathBuf> },

    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Dataset metadata is missing or inconsistent
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Model outputs and labels cannot be scored together
    #[error("Evaluation error: {0}")]
    Eval(String),
}

impl Error {
    /// Wrap an IO error with the operation that failed
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
