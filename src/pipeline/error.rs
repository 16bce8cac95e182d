use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::embedding::EmbeddingError;
use crate::ner::NerError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("failed to load encoder")]
    EmbedderLoad(#[from] EmbeddingError),

    #[error("failed to load entity extractor")]
    ExtractorLoad(#[from] NerError),

    #[error("record {index}: embedding failed")]
    Embedding {
        index: usize,
        #[source]
        source: EmbeddingError,
    },

    #[error("record {index}: entity extraction failed")]
    Entities {
        index: usize,
        #[source]
        source: NerError,
    },
}
