//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `QAEMBED_*` environment variables;
//! command-line flags are layered on top by the binary.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{BERT_MAX_POSITIONS, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::PoolingStrategy;

/// Run configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QAEMBED_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Encoder model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// `None` runs the embedder in stub mode.
    pub encoder_path: Option<PathBuf>,

    /// Token-classification model directory. `None` runs the extractor in stub mode.
    pub ner_path: Option<PathBuf>,

    /// Tokens per question. Default: `128`.
    pub max_seq_len: usize,

    /// How token states are pooled into one vector. Default: [`PoolingStrategy::Mean`].
    pub pooling: PoolingStrategy,

    /// L2-normalize embeddings. Default: `false`.
    pub normalize: bool,

    /// JSON object of fixed replies `ask` checks before embedding search.
    pub responses_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoder_path: None,
            ner_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            pooling: PoolingStrategy::default(),
            normalize: false,
            responses_path: None,
        }
    }
}

impl Config {
    const ENV_ENCODER_PATH: &'static str = "QAEMBED_ENCODER_PATH";
    const ENV_NER_PATH: &'static str = "QAEMBED_NER_PATH";
    const ENV_MAX_SEQ_LEN: &'static str = "QAEMBED_MAX_SEQ_LEN";
    const ENV_POOLING: &'static str = "QAEMBED_POOLING";
    const ENV_NORMALIZE: &'static str = "QAEMBED_NORMALIZE";
    const ENV_RESPONSES_PATH: &'static str = "QAEMBED_RESPONSES_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let ner_path = Self::parse_optional_path_from_env(Self::ENV_NER_PATH);
        let max_seq_len = Self::parse_max_seq_len_from_env(defaults.max_seq_len)?;
        let pooling = Self::parse_pooling_from_env(defaults.pooling)?;
        let normalize = Self::parse_flag_from_env(Self::ENV_NORMALIZE, defaults.normalize);
        let responses_path = Self::parse_optional_path_from_env(Self::ENV_RESPONSES_PATH);

        Ok(Self {
            encoder_path,
            ner_path,
            max_seq_len,
            pooling,
            normalize,
            responses_path,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_seq_len == 0 || self.max_seq_len > BERT_MAX_POSITIONS {
            return Err(ConfigError::InvalidMaxSeqLen {
                value: self.max_seq_len.to_string(),
            });
        }

        for path in [&self.encoder_path, &self.ner_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.responses_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_max_seq_len_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_SEQ_LEN) {
            Ok(value) => {
                let len: usize =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::MaxSeqLenParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if len == 0 || len > BERT_MAX_POSITIONS {
                    return Err(ConfigError::InvalidMaxSeqLen { value });
                }

                Ok(len)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_pooling_from_env(default: PoolingStrategy) -> Result<PoolingStrategy, ConfigError> {
        match env::var(Self::ENV_POOLING) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPooling { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_flag_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }
}
