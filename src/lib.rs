//! qa-embed library crate (used by the binary and integration tests).
//!
//! Reads a JSON array of question/answer records, embeds every question with a
//! BERT encoder (mean pooling), tags named entities in questions and answers,
//! and writes the augmented records back out as JSON.
//!
//! ## Modules
//! - [`config`]: `QAEMBED_*` environment configuration
//! - [`embedding`]: [`SentenceEmbedder`] and the candle BERT wrappers
//! - [`ner`]: [`EntityExtractor`] and BIO span decoding
//! - [`dataset`]: [`QaPair`], [`AugmentedQaPair`] and JSON I/O
//! - [`pipeline`]: [`Augmenter`], the load → map → serialize run
//! - [`retrieval`]: canned replies and nearest-question answer lookup
//!
//! Both models fall back to deterministic stubs when no model directory is
//! configured, so everything here runs without downloaded weights.

pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod embedding;
pub mod ner;
pub mod pipeline;
pub mod retrieval;

pub use config::{Config, ConfigError};
pub use dataset::{AugmentedQaPair, DatasetError, OutputTarget, QaPair};
pub use embedding::{EmbedderConfig, EmbeddingError, PoolingStrategy, SentenceEmbedder};
pub use ner::{Entity, EntityExtractor, NerConfig, NerError};
pub use pipeline::{Augmenter, PipelineError};
pub use retrieval::{
    CannedResponses, RetrievalError, answer_for, ask, best_match, cosine_similarity,
};
