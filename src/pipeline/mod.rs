//! The augment run: load models once, map every record, serialize.

pub mod error;


pub use error::PipelineError;

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::dataset::{self, AugmentedQaPair, OutputTarget, QaPair};
use crate::embedding::{EmbedderConfig, SentenceEmbedder};
use crate::ner::{EntityExtractor, NerConfig};

/// Embeds questions and tags entities for a batch of records.
#[derive(Debug)]
pub struct Augmenter {
    embedder: SentenceEmbedder,
    extractor: EntityExtractor,
}

impl Augmenter {
    pub fn new(embedder: SentenceEmbedder, extractor: EntityExtractor) -> Self {
        Self {
            embedder,
            extractor,
        }
    }

    /// Loads both models as described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let embedder = SentenceEmbedder::load(EmbedderConfig::from_config(config))?;
        let extractor = EntityExtractor::load(NerConfig::from_config(config))?;
        Ok(Self::new(embedder, extractor))
    }

    /// Augments records in input order. Identical questions share one
    /// embedding; the first failing record aborts the batch.
    pub fn augment(&self, pairs: Vec<QaPair>) -> Result<Vec<AugmentedQaPair>, PipelineError> {
        let total = pairs.len();
        let mut embeddings: HashMap<String, Vec<f32>> = HashMap::new();
        let mut records = Vec::with_capacity(total);

        for (index, pair) in pairs.into_iter().enumerate() {
            debug!(index, total, question = %pair.question, "Augmenting record");

            let embedding = match embeddings.get(&pair.question) {
                Some(cached) => cached.clone(),
                None => {
                    let embedding = self
                        .embedder
                        .embed(&pair.question)
                        .map_err(|source| PipelineError::Embedding { index, source })?;
                    embeddings.insert(pair.question.clone(), embedding.clone());
                    embedding
                }
            };

            let question_entities = self
                .extractor
                .extract(&pair.question)
                .map_err(|source| PipelineError::Entities { index, source })?;
            let answer_entities = self
                .extractor
                .extract(&pair.answer)
                .map_err(|source| PipelineError::Entities { index, source })?;

            records.push(AugmentedQaPair::new(
                pair,
                embedding,
                question_entities,
                answer_entities,
            ));
        }

        info!(
            records = records.len(),
            unique_questions = embeddings.len(),
            "Augmentation complete"
        );

        Ok(records)
    }

    pub fn embedder(&self) -> &SentenceEmbedder {
        &self.embedder
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }
}

/// Runs one full augment pass: load models, read `input`, write to `target`.
pub fn run(
    config: &Config,
    input: &Path,
    target: &OutputTarget,
    pretty: bool,
) -> Result<usize, PipelineError> {
    config.validate()?;

    let augmenter = Augmenter::from_config(config)?;
    let pairs = dataset::load_pairs(input)?;
    let records = augmenter.augment(pairs)?;
    dataset::write_output(&records, target, pretty)?;

    Ok(records.len())
}
