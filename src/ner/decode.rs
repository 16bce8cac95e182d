//! Token labels → entity spans.
//!
//! Decoding works on words rather than subword tokens: every token of a word
//! takes the label predicted for the word's first token, then words are grouped
//! by their BIO tags.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ner::error::NerError;

/// One named entity: its exact text and category label.
///
/// Serialized as a two-element array, e.g. `["ISO 9001", "MISC"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

impl From<(String, String)> for Entity {
    fn from((text, label): (String, String)) -> Self {
        Self { text, label }
    }
}

impl From<Entity> for (String, String) {
    fn from(entity: Entity) -> Self {
        (entity.text, entity.label)
    }
}

/// A token label split into its BIO role and entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    Outside,
    Begin(&'a str),
    Inside(&'a str),
}

impl<'a> Tag<'a> {
    /// Parses `O`, `B-X`, `I-X` (and the BIOES `S-X` / `E-X`). A label
    /// without a prefix behaves like `I-<label>`.
    pub fn parse(label: &'a str) -> Self {
        if label == "O" || label.is_empty() {
            return Tag::Outside;
        }

        match label.split_once(['-', '_']) {
            Some(("B" | "S", kind)) if !kind.is_empty() => Tag::Begin(kind),
            Some(("I" | "E", kind)) if !kind.is_empty() => Tag::Inside(kind),
            _ => Tag::Inside(label),
        }
    }
}

/// Per-token model output, aligned with the tokenizer's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken {
    /// Word index from the pre-tokenizer; `None` for special tokens.
    pub word: Option<u32>,
    /// Byte offsets into the source text.
    pub offsets: (usize, usize),
    pub special: bool,
    pub label_id: usize,
}

/// Converts `id2label` from a Hugging Face `config.json` into a dense table.
pub fn labels_from_config(config_json: &str) -> Result<Vec<String>, NerError> {
    #[derive(Deserialize)]
    struct LabelConfig {
        id2label: HashMap<String, String>,
    }

    let parsed: LabelConfig =
        serde_json::from_str(config_json).map_err(|e| NerError::InvalidLabels {
            reason: format!("config.json has no usable id2label: {}", e),
        })?;

    let mut labels = vec![None; parsed.id2label.len()];
    for (id, label) in parsed.id2label {
        let idx: usize = id.parse().map_err(|_| NerError::InvalidLabels {
            reason: format!("label id '{}' is not an integer", id),
        })?;
        let slot = labels.get_mut(idx).ok_or_else(|| NerError::InvalidLabels {
            reason: format!("label id {} is out of range", idx),
        })?;
        *slot = Some(label);
    }

    let labels: Vec<String> = labels.into_iter().flatten().collect();
    if labels.is_empty() {
        return Err(NerError::InvalidLabels {
            reason: "id2label is empty".to_string(),
        });
    }
    Ok(labels)
}

struct Word {
    start: usize,
    end: usize,
    label_id: usize,
}

fn group_words(tokens: &[TaggedToken]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut current_word: Option<u32> = None;

    for token in tokens.iter().filter(|t| !t.special) {
        let (start, end) = token.offsets;
        if start == end {
            continue;
        }

        let same_word = matches!((token.word, current_word), (Some(w), Some(cur)) if w == cur);
        match words.last_mut() {
            Some(last) if same_word => last.end = end,
            _ => words.push(Word {
                start,
                end,
                label_id: token.label_id,
            }),
        }
        current_word = token.word;
    }

    words
}

/// Groups tagged tokens into entities whose text is an exact slice of `text`.
///
/// Unknown label ids are treated as `O`.
pub fn decode_entities(text: &str, tokens: &[TaggedToken], labels: &[String]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut open: Option<(&str, usize, usize)> = None;

    let close = |span: Option<(&str, usize, usize)>, entities: &mut Vec<Entity>| {
        if let Some((kind, start, end)) = span
            && let Some(slice) = text.get(start..end)
            && !slice.trim().is_empty()
        {
            entities.push(Entity::new(slice, kind));
        }
    };

    for word in group_words(tokens) {
        let tag = labels
            .get(word.label_id)
            .map(|l| Tag::parse(l))
            .unwrap_or(Tag::Outside);

        match tag {
            Tag::Outside => close(open.take(), &mut entities),
            Tag::Begin(kind) => {
                close(open.take(), &mut entities);
                open = Some((kind, word.start, word.end));
            }
            Tag::Inside(kind) => match open {
                Some((open_kind, start, _)) if open_kind == kind => {
                    open = Some((kind, start, word.end));
                }
                _ => {
                    close(open.take(), &mut entities);
                    open = Some((kind, word.start, word.end));
                }
            },
        }
    }
    close(open.take(), &mut entities);

    entities
}
