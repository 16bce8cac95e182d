//! Named entity extraction.
//!
//! [`EntityExtractor`] runs a BERT token-classification checkpoint (for
//! example `dslim/bert-base-NER`) and decodes its BIO tags into
//! [`Entity`] spans. Without a model directory it falls back to
//! [`stub::extract_stub`].

pub mod config;
pub mod decode;
pub mod error;
pub mod stub;

#[cfg(test)]
mod tests;

pub use config::{NER_MAX_SEQ_LEN, NerConfig};
pub use decode::{Entity, Tag, TaggedToken, decode_entities, labels_from_config};
pub use error::NerError;

use candle_core::{D, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertTokenClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::{
    ModelFiles, load_tokenizer_with_truncation, truncated_token_count,
};

struct TaggerModel {
    model: BertTokenClassifier,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

/// Entity extractor (supports stub mode).
pub struct EntityExtractor {
    model: Option<TaggerModel>,
    config: NerConfig,
}

impl std::fmt::Debug for EntityExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityExtractor")
            .field("config", &self.config)
            .field("labels", &self.labels())
            .field(
                "device",
                &self.model.as_ref().map(|m| format!("{:?}", m.device)),
            )
            .finish()
    }
}

impl EntityExtractor {
    pub fn load(config: NerConfig) -> Result<Self, NerError> {
        config.validate()?;

        let Some(model_dir) = config.model_dir.clone() else {
            warn!("Entity extractor running in STUB mode (no NER model configured)");
            return Ok(Self {
                model: None,
                config,
            });
        };

        if !model_dir.is_dir() {
            return Err(NerError::ModelNotFound { path: model_dir });
        }

        let files = ModelFiles::in_dir(&model_dir);
        if let Some(missing) = files.first_missing() {
            return Err(NerError::ModelLoadFailed {
                reason: format!("Missing {}", missing.display()),
            });
        }

        let labels = labels_from_config(&std::fs::read_to_string(&files.config)?)?;

        let device = select_device();
        debug!(?device, "Selected compute device for entity extractor");

        let model = BertTokenClassifier::load(&model_dir, labels.len(), &device).map_err(|e| {
            NerError::ModelLoadFailed {
                reason: format!("Failed to load BERT token classifier: {}", e),
            }
        })?;

        let tokenizer =
            load_tokenizer_with_truncation(&model_dir, config.max_seq_len).map_err(|e| {
                NerError::ModelLoadFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                }
            })?;

        info!(
            model_dir = %model_dir.display(),
            num_labels = model.num_labels(),
            "NER model loaded"
        );

        Ok(Self {
            model: Some(TaggerModel {
                model,
                tokenizer,
                labels,
                device,
            }),
            config,
        })
    }

    pub fn stub() -> Result<Self, NerError> {
        Self::load(NerConfig::stub())
    }

    /// Extracts `(text, label)` entities in order of appearance.
    pub fn extract(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let entities = match &self.model {
            Some(tagger) => Self::extract_with_model(text, tagger)?,
            None => stub::extract_stub(text),
        };

        debug!(text = %text, entities = ?entities, "Entities found");

        Ok(entities)
    }

    fn extract_with_model(text: &str, tagger: &TaggerModel) -> Result<Vec<Entity>, NerError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding =
            tagger
                .tokenizer
                .encode(text, true)
                .map_err(|e| NerError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let dropped = truncated_token_count(&encoding);
        if dropped > 0 {
            warn!(
                text_len = text.len(),
                dropped_tokens = dropped,
                "Text exceeds the tagger's sequence limit; trailing entities are skipped"
            );
        }

        let input_ids = Tensor::new(encoding.get_ids(), &tagger.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &tagger.device)?.unsqueeze(0)?;

        let logits = tagger
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| NerError::InferenceFailed {
                reason: format!("Token classifier forward pass failed: {}", e),
            })?;

        let label_ids = logits.squeeze(0)?.argmax(D::Minus1)?.to_vec1::<u32>()?;

        let tokens: Vec<TaggedToken> = encoding
            .get_word_ids()
            .iter()
            .zip(encoding.get_offsets())
            .zip(encoding.get_special_tokens_mask())
            .zip(label_ids)
            .map(|(((word, offsets), special), label_id)| TaggedToken {
                word: *word,
                offsets: *offsets,
                special: *special == 1,
                label_id: label_id as usize,
            })
            .collect();

        Ok(decode_entities(text, &tokens, &tagger.labels))
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        self.model.is_none()
    }

    /// Model labels in id order (empty in stub mode).
    pub fn labels(&self) -> &[String] {
        self.model
            .as_ref()
            .map(|m| m.labels.as_slice())
            .unwrap_or_default()
    }

    pub fn config(&self) -> &NerConfig {
        &self.config
    }
}
