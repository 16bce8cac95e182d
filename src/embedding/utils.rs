use std::io;
use std::path::{Path, PathBuf};
use tokenizers::{Encoding, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

pub const CONFIG_FILE: &str = "config.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// The three files a Hugging Face BERT checkpoint directory must provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub weights: PathBuf,
    pub tokenizer: PathBuf,
}

impl ModelFiles {
    pub fn in_dir(model_dir: &Path) -> Self {
        Self {
            config: model_dir.join(CONFIG_FILE),
            weights: model_dir.join(WEIGHTS_FILE),
            tokenizer: model_dir.join(TOKENIZER_FILE),
        }
    }

    /// Returns the first required file that does not exist.
    pub fn first_missing(&self) -> Option<&Path> {
        [&self.config, &self.weights, &self.tokenizer]
            .into_iter()
            .find(|p| !p.exists())
            .map(PathBuf::as_path)
    }
}

/// Loads a tokenizer from a model directory or explicit tokenizer.json path.
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new(TOKENIZER_FILE))
    {
        model_path.to_path_buf()
    } else if model_path.is_dir() {
        model_path.join(TOKENIZER_FILE)
    } else {
        model_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Model path has no parent"))?
            .join(TOKENIZER_FILE)
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates to `max_len` and optionally pads every
/// encoding to exactly `max_len` tokens.
///
/// Fixed padding matters for plain mean pooling: padded positions take part
/// in the average, so the pad length is part of the embedding's definition.
pub fn load_tokenizer_for_encoder(
    model_path: &Path,
    max_len: usize,
    pad_to_max: bool,
) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    if pad_to_max {
        let pad_id = tokenizer.token_to_id("[PAD]").unwrap_or(0);
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(max_len),
            pad_id,
            pad_token: "[PAD]".to_string(),
            ..Default::default()
        }));
    } else {
        tokenizer.with_padding(None);
    }

    Ok(tokenizer)
}

/// Loads a tokenizer with truncation only (no padding), as used for tagging.
pub fn load_tokenizer_with_truncation(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    load_tokenizer_for_encoder(model_path, max_len, false)
}

/// Number of non-special tokens truncation cut from `encoding`.
pub fn truncated_token_count(encoding: &Encoding) -> usize {
    encoding
        .get_overflowing()
        .iter()
        .flat_map(|overflow| overflow.get_special_tokens_mask())
        .filter(|&&special| special == 0)
        .count()
}
