//! Sentence embedder (BERT encoder + mean pooling).
//!
//! Use [`EmbedderConfig::stub`] for tests and dry runs without model files.

/// Embedder configuration.
pub mod config;


pub use config::{EmbedderConfig, PoolingStrategy};

use candle_core::{D, DType, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{ModelFiles, load_tokenizer_for_encoder, truncated_token_count};

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Embedding generator for questions (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    embedding_dim: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .field("pooling", &self.config.pooling)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode when no model directory is set).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_dir) = config.model_dir.clone() else {
            warn!("Embedder running in STUB mode (no encoder model configured)");
            return Ok(Self {
                embedding_dim: config.embedding_dim,
                backend: EmbedderBackend::Stub,
                config,
            });
        };

        if !model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound { path: model_dir });
        }

        if let Some(missing) = ModelFiles::in_dir(&model_dir).first_missing() {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("Missing {}", missing.display()),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for embedder");

        let encoder =
            BertEncoder::load(&model_dir, &device).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            })?;

        let tokenizer = load_tokenizer_for_encoder(
            &model_dir,
            config.max_seq_len,
            config.pooling.pads_to_max(),
        )
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        })?;

        let embedding_dim = encoder.hidden_size();

        info!(
            model_dir = %model_dir.display(),
            embedding_dim,
            max_seq_len = config.max_seq_len,
            pooling = ?config.pooling,
            "Encoder model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            },
            config,
            embedding_dim,
        })
    }

    /// Shorthand for `load(EmbedderConfig::stub())`.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub())
    }

    /// Generates an embedding for a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let pooled = match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device)?,
            EmbedderBackend::Stub => self.embed_stub(text),
        };

        Ok(self.finish(pooled))
    }

    /// Generates embeddings for a batch of strings, one forward pass each.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            truncated = truncated_token_count(&encoding),
            "Generating embedding (encoder forward pass)"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let hidden = encoder
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let pooled = pool(&hidden, &attention_mask, self.config.pooling)?;
        Ok(pooled.squeeze(0)?.to_vec1::<f32>()?)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let hash = blake3::hash(text.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hash.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        (0..self.embedding_dim)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    fn finish(&self, mut embedding: Vec<f32>) -> Vec<f32> {
        if self.config.normalize {
            let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for x in &mut embedding {
                    *x /= norm;
                }
            }
        }
        embedding
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

/// Reduces `[batch, seq_len, hidden]` states to `[batch, hidden]`.
///
/// `attention_mask` is `[batch, seq_len]` of any numeric dtype.
pub(crate) fn pool(
    hidden: &Tensor,
    attention_mask: &Tensor,
    strategy: PoolingStrategy,
) -> candle_core::Result<Tensor> {
    match strategy {
        PoolingStrategy::Mean => hidden.mean(1),
        PoolingStrategy::MaskedMean => {
            let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(D::Minus1)?;
            let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
            let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
            summed.broadcast_div(&counts)
        }
    }
}
