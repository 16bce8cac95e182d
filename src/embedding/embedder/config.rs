use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;

use crate::config::Config;
use crate::constants::{BERT_MAX_POSITIONS, DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

/// How token states are reduced to a single vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PoolingStrategy {
    /// Mean over every position of the fixed-length padded sequence.
    #[default]
    Mean,
    /// Mean over positions whose attention mask is set.
    MaskedMean,
}

impl PoolingStrategy {
    /// Plain mean pooling averages over padding, so it needs a fixed pad length.
    pub fn pads_to_max(self) -> bool {
        matches!(self, PoolingStrategy::Mean)
    }
}

impl FromStr for PoolingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Model directory. `None` selects the stub backend.
    pub model_dir: Option<PathBuf>,
    /// Truncation (and, for [`PoolingStrategy::Mean`], padding) length.
    pub max_seq_len: usize,
    /// Stub output dimension. A loaded model uses its hidden size instead.
    pub embedding_dim: usize,
    pub pooling: PoolingStrategy,
    /// L2-normalize the pooled vector.
    pub normalize: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            pooling: PoolingStrategy::default(),
            normalize: false,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self::default()
    }

    /// Derives the embedder settings from the run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            model_dir: config.encoder_path.clone(),
            max_seq_len: config.max_seq_len,
            pooling: config.pooling,
            normalize: config.normalize,
            ..Default::default()
        }
    }

    pub fn with_pooling(mut self, pooling: PoolingStrategy) -> Self {
        self.pooling = pooling;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.model_dir.is_none()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 || self.max_seq_len > BERT_MAX_POSITIONS {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "max_seq_len must be between 1 and {}, got {}",
                    BERT_MAX_POSITIONS, self.max_seq_len
                ),
            });
        }

        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }

        if let Some(ref dir) = self.model_dir
            && dir.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }
}
