use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

use crate::embedding::utils::ModelFiles;

/// Checkpoints exported from task heads nest the encoder under `bert.`.
fn load_body(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

fn read_config(files: &ModelFiles) -> Result<Config> {
    let config_content = std::fs::read_to_string(&files.config)?;
    serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}

fn mmap_weights(files: &ModelFiles, device: &Device) -> Result<VarBuilder<'static>> {
    // SAFETY: the weights file is opened read-only and not modified while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, device) }
}

/// Plain BERT encoder returning the final hidden states.
pub struct BertEncoder {
    bert: BertModel,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let files = ModelFiles::in_dir(model_dir.as_ref());
        let config = read_config(&files)?;
        let vb = mmap_weights(&files, device)?;
        let bert = load_body(&vb, &config)?;

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    /// Returns `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.bert.forward(input_ids, token_type_ids, attention_mask)
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }
}

/// BERT with a per-token linear head (`BertForTokenClassification`).
pub struct BertTokenClassifier {
    bert: BertModel,
    classifier: Linear,
    num_labels: usize,
}

impl BertTokenClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, num_labels: usize, device: &Device) -> Result<Self> {
        let files = ModelFiles::in_dir(model_dir.as_ref());
        let config = read_config(&files)?;
        let vb = mmap_weights(&files, device)?;
        let bert = load_body(&vb, &config)?;
        let classifier = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            classifier,
            num_labels,
        })
    }

    /// Returns logits of shape `[batch, seq_len, num_labels]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        self.classifier.forward(&hidden)
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }
}
