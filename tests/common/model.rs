//! Tiny randomly initialised BERT checkpoints written to a temp directory.
//!
//! Weights are random, so tests built on these only check shapes, spans and
//! plumbing, never specific predictions.

use std::fs;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokenizers::Tokenizer;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;

pub const HIDDEN_SIZE: usize = 8;

pub const TAG_LABELS: [&str; 5] = ["O", "B-ORG", "I-ORG", "B-MISC", "I-MISC"];

const VOCAB: &[&str] = &[
    "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "what", "is", "are", "the", "audit", "and",
    "inspection", "module", "qhse", "standard", "##s", "common", "include", "iso", "900", "##1",
    "for", "quality", "goodbye", "?", ".", "!",
];

fn bert_config(id2label: Option<Value>) -> Value {
    let mut config = json!({
        "architectures": ["BertModel"],
        "model_type": "bert",
        "vocab_size": VOCAB.len(),
        "hidden_size": HIDDEN_SIZE,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 16,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.0,
        "max_position_embeddings": 512,
        "type_vocab_size": 2,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-12,
        "pad_token_id": 0,
        "classifier_dropout": null
    });
    if let (Some(labels), Some(map)) = (id2label, config.as_object_mut()) {
        map.insert("id2label".to_string(), labels);
    }
    config
}

fn write_config(dir: &Path, config: &Value) -> BertConfig {
    fs::write(
        dir.join("config.json"),
        serde_json::to_string_pretty(config).unwrap(),
    )
    .unwrap();
    serde_json::from_value(config.clone()).unwrap()
}

fn write_tokenizer(dir: &Path) {
    let vocab = WordPiece::read_bytes(VOCAB.join("\n").as_bytes()).unwrap();
    let model = WordPiece::builder()
        .vocab(vocab)
        .unk_token("[UNK]".to_string())
        .build()
        .unwrap();

    let mut tokenizer = Tokenizer::new(model);
    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_post_processor(Some(BertProcessing::new(
        ("[SEP]".to_string(), 3),
        ("[CLS]".to_string(), 2),
    )));
    tokenizer.save(dir.join("tokenizer.json"), false).unwrap();
}

/// Encoder checkpoint with top-level `embeddings.*` / `encoder.*` tensors.
pub fn write_encoder(dir: &Path) {
    let config = write_config(dir, &bert_config(None));
    write_tokenizer(dir);

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    BertModel::load(vb, &config).unwrap();
    varmap.save(dir.join("model.safetensors")).unwrap();
}

/// Token-classification checkpoint: body under `bert.`, head under `classifier`.
pub fn write_tagger(dir: &Path) {
    let id2label: serde_json::Map<String, Value> = TAG_LABELS
        .iter()
        .enumerate()
        .map(|(id, label)| (id.to_string(), json!(label)))
        .collect();
    let config = write_config(dir, &bert_config(Some(Value::Object(id2label))));
    write_tokenizer(dir);

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    BertModel::load(vb.pp("bert"), &config).unwrap();
    candle_nn::linear(HIDDEN_SIZE, TAG_LABELS.len(), vb.pp("classifier")).unwrap();
    varmap.save(dir.join("model.safetensors")).unwrap();
}

/// Both checkpoints side by side; dropping the value removes them.
pub struct TinyModels {
    _root: TempDir,
    pub encoder: PathBuf,
    pub tagger: PathBuf,
}

impl TinyModels {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let encoder = root.path().join("encoder");
        let tagger = root.path().join("tagger");
        fs::create_dir(&encoder).unwrap();
        fs::create_dir(&tagger).unwrap();
        write_encoder(&encoder);
        write_tagger(&tagger);

        Self {
            _root: root,
            encoder,
            tagger,
        }
    }
}
