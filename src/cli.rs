//! Command-line arguments.
//!
//! `qa-embed <INPUT>` runs the augment pass; `qa-embed ask` answers a query
//! from a file an earlier run produced. Model flags override `QAEMBED_*`
//! environment values.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::embedding::PoolingStrategy;

#[derive(Parser, Debug)]
#[command(
    name = "qa-embed",
    version,
    about = "Embed questions and tag named entities in a question/answer JSON file",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub augment: AugmentArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the answer whose question is closest to QUERY
    Ask(AskArgs),
}

#[derive(Args, Debug)]
pub struct AugmentArgs {
    /// JSON array of {"question", "answer"} records
    #[arg(required = true, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Write to a file instead of stdout (default name: qaEmbeddings.json
    /// beside INPUT)
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    pub output_file: Option<Option<PathBuf>>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Output of a previous augment run
    #[arg(value_name = "AUGMENTED")]
    pub index: PathBuf,

    /// Free-text question
    pub query: String,

    /// JSON object of phrase → reply pairs checked before the nearest-question search
    #[arg(long, value_name = "FILE")]
    pub responses: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ModelArgs {
    /// Encoder model directory (config.json, model.safetensors, tokenizer.json)
    #[arg(long, value_name = "DIR")]
    pub encoder: Option<PathBuf>,

    /// Token-classification model directory
    #[arg(long, value_name = "DIR")]
    pub ner: Option<PathBuf>,

    /// Tokens per question
    #[arg(long, value_name = "N")]
    pub max_seq_len: Option<usize>,

    #[arg(long, value_enum)]
    pub pooling: Option<PoolingStrategy>,

    /// L2-normalize embeddings
    #[arg(long)]
    pub normalize: bool,
}

impl ModelArgs {
    /// Layers flags that were given over `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref path) = self.encoder {
            config.encoder_path = Some(path.clone());
        }
        if let Some(ref path) = self.ner {
            config.ner_path = Some(path.clone());
        }
        if let Some(len) = self.max_seq_len {
            config.max_seq_len = len;
        }
        if let Some(pooling) = self.pooling {
            config.pooling = pooling;
        }
        if self.normalize {
            config.normalize = true;
        }
    }
}
