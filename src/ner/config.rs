use std::path::PathBuf;

use crate::config::Config;
use crate::constants::BERT_MAX_POSITIONS;
use crate::ner::error::NerError;

/// Tagging sees the whole answer text, so truncation defaults to the model limit.
pub const NER_MAX_SEQ_LEN: usize = BERT_MAX_POSITIONS;

#[derive(Debug, Clone, PartialEq)]
pub struct NerConfig {
    /// Token-classification model directory. `None` selects the stub backend.
    pub model_dir: Option<PathBuf>,

    pub max_seq_len: usize,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: NER_MAX_SEQ_LEN,
        }
    }
}

impl NerConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            model_dir: config.ner_path.clone(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), NerError> {
        if self.max_seq_len == 0 || self.max_seq_len > BERT_MAX_POSITIONS {
            return Err(NerError::InvalidConfig {
                reason: format!(
                    "max_seq_len must be between 1 and {}, got {}",
                    BERT_MAX_POSITIONS, self.max_seq_len
                ),
            });
        }

        if let Some(ref dir) = self.model_dir
            && dir.as_os_str().is_empty()
        {
            return Err(NerError::InvalidConfig {
                reason: "model_dir cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }
}
