//! Dataset I/O error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    /// File exists but could not be read or written.
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON of the expected shape.
    #[error("invalid JSON in {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write output")]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
