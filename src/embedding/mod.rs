//! Encoder + model utilities.
//!
//! - [`embedder`] turns questions into fixed-size vectors.
//! - [`bert`] holds the candle BERT wrappers shared with [`crate::ner`].

/// BERT encoder and token-classification wrappers.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence embedder (mean pooling over encoder states).
pub mod embedder;
mod error;
/// Tokenizer/model directory helpers.
pub mod utils;

pub use embedder::{EmbedderConfig, PoolingStrategy, SentenceEmbedder};
pub use error::EmbeddingError;
