//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sequence length is outside the range a BERT checkpoint accepts (1-512).
    #[error("invalid max sequence length '{value}': must be between 1 and 512")]
    InvalidMaxSeqLen { value: String },

    /// Sequence length string could not be parsed as a number.
    #[error("failed to parse max sequence length '{value}'")]
    MaxSeqLenParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Pooling name is not one of `mean`, `masked-mean`.
    #[error("invalid pooling strategy '{value}': expected 'mean' or 'masked-mean'")]
    InvalidPooling { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a model directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Path exists but is not a regular file (when a JSON file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
