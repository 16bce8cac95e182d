//! Cross-cutting, shared constants.
//!
//! The defaults mirror `bert-base-uncased`, the encoder the reference datasets were embedded with.

/// Hidden size of `bert-base` encoders; also the stub embedder's output dimension.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Tokens per question (truncation and fixed padding length).
pub const DEFAULT_MAX_SEQ_LEN: usize = 128;

/// Positional embedding limit of BERT checkpoints.
pub const BERT_MAX_POSITIONS: usize = 512;

/// File name used when `--output-file` is given without a path.
pub const DEFAULT_OUTPUT_FILENAME: &str = "qaEmbeddings.json";

/// Reply used by `ask` when there is nothing to match against.
pub const FALLBACK_ANSWER: &str = "I am not sure how to respond to that.";

/// Message prefix for the process-level error handler.
pub const ERROR_PREFIX: &str = "Error processing embeddings";

/// Label given by the stub extractor to capitalized runs containing an acronym.
pub const STUB_ACRONYM_LABEL: &str = "ORG";

/// Label given by the stub extractor to other capitalized runs.
pub const STUB_DEFAULT_LABEL: &str = "MISC";
