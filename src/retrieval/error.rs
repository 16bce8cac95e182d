use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("failed to load encoder")]
    EmbedderLoad(#[source] EmbeddingError),

    #[error("failed to embed query")]
    Embedding(#[source] EmbeddingError),

    /// A stored embedding cannot be compared with the query embedding.
    #[error("embedding dimension mismatch: record {index} has {found}, encoder produces {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}
