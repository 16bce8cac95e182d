//! Answer lookup over augmented records.
//!
//! [`ask`] checks the optional [`CannedResponses`] table first and otherwise
//! returns the answer of the question nearest to the query embedding.

pub mod error;
pub mod responses;


pub use error::RetrievalError;
pub use responses::{CannedResponses, normalize_query};

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::constants::FALLBACK_ANSWER;
use crate::dataset::{self, AugmentedQaPair};
use crate::embedding::{EmbedderConfig, SentenceEmbedder};

/// A record chosen by [`best_match`] with its similarity to the query.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub index: usize,
    pub record: &'a AugmentedQaPair,
    pub score: f32,
}

#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// NaN scores rank below every real score.
fn rank(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Returns the record whose question embedding is closest to `query`.
/// Ties go to the earliest record; `None` when `records` is empty.
pub fn best_match<'a>(query: &[f32], records: &'a [AugmentedQaPair]) -> Option<Match<'a>> {
    let best = records
        .iter()
        .enumerate()
        .map(|(index, record)| Match {
            index,
            record,
            score: cosine_similarity(query, &record.embedding),
        })
        .fold(None, |best: Option<Match<'a>>, candidate| match best {
            Some(current) if rank(current.score).total_cmp(&rank(candidate.score)).is_ge() => {
                Some(current)
            }
            _ => Some(candidate),
        });

    if let Some(ref m) = best {
        debug!(
            index = m.index,
            score = m.score,
            question = %m.record.question,
            "Best matching question"
        );
    }

    best
}

/// The best match's answer, or [`FALLBACK_ANSWER`] when there is nothing to match.
pub fn answer_for<'a>(query: &[f32], records: &'a [AugmentedQaPair]) -> &'a str {
    best_match(query, records)
        .map(|m| m.record.answer.as_str())
        .unwrap_or(FALLBACK_ANSWER)
}

/// Fails on the first record whose embedding length differs from `expected`.
pub fn check_dimensions(expected: usize, records: &[AugmentedQaPair]) -> Result<(), RetrievalError> {
    match records
        .iter()
        .enumerate()
        .find(|(_, record)| record.embedding.len() != expected)
    {
        Some((index, record)) => Err(RetrievalError::DimensionMismatch {
            index,
            expected,
            found: record.embedding.len(),
        }),
        None => Ok(()),
    }
}

/// Answers `query` from the augmented file at `index`.
pub fn ask(config: &Config, index: &Path, query: &str) -> Result<String, RetrievalError> {
    config.validate()?;

    let records = dataset::load_augmented(index)?;

    if let Some(path) = config.responses_path.as_deref() {
        let canned = CannedResponses::load(path)?;
        if let Some(reply) = canned.lookup(query) {
            debug!(query, "Matched canned response");
            return Ok(reply.to_string());
        }
    }

    let embedder = SentenceEmbedder::load(EmbedderConfig::from_config(config))
        .map_err(RetrievalError::EmbedderLoad)?;
    let query_embedding = embedder.embed(query).map_err(RetrievalError::Embedding)?;
    check_dimensions(query_embedding.len(), &records)?;

    Ok(answer_for(&query_embedding, &records).to_string())
}
