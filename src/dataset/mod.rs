//! Question/answer records and their JSON I/O.
//!
//! Input is a JSON array of `{"question": ..., "answer": ...}` objects. Extra
//! keys on a record are kept and written back out unchanged.

pub mod error;


pub use error::DatasetError;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::constants::DEFAULT_OUTPUT_FILENAME;
use crate::ner::Entity;

/// Keys added by augmentation; never carried over from input extras.
pub const AUGMENTED_KEYS: [&str; 3] = ["embedding", "question_entities", "answer_entities"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            extra: Map::new(),
        }
    }
}

/// A [`QaPair`] with its question embedding and extracted entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedQaPair {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub embedding: Vec<f32>,
    pub question_entities: Vec<Entity>,
    pub answer_entities: Vec<Entity>,
}

impl AugmentedQaPair {
    pub fn new(
        pair: QaPair,
        embedding: Vec<f32>,
        question_entities: Vec<Entity>,
        answer_entities: Vec<Entity>,
    ) -> Self {
        let QaPair {
            question,
            answer,
            mut extra,
        } = pair;

        for key in AUGMENTED_KEYS {
            extra.remove(key);
        }

        Self {
            question,
            answer,
            extra,
            embedding,
            question_entities,
            answer_entities,
        }
    }
}

/// Where the augmented document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Maps the `--output-file [PATH]` flag: absent → stdout, bare flag →
    /// the fixed file name beside `input`, with a value → that path.
    pub fn resolve(output_file: Option<Option<PathBuf>>, input: &Path) -> Self {
        match output_file {
            None => OutputTarget::Stdout,
            Some(Some(path)) => OutputTarget::File(path),
            Some(None) => OutputTarget::File(
                input
                    .parent()
                    .unwrap_or_else(|| Path::new(""))
                    .join(DEFAULT_OUTPUT_FILENAME),
            ),
        }
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn parse<T: DeserializeOwned>(json: &str, origin: &str) -> Result<Vec<T>, DatasetError> {
    serde_json::from_str(json).map_err(|e| DatasetError::Parse {
        origin: origin.to_string(),
        source: e,
    })
}

/// Parses a JSON array of question/answer records.
pub fn parse_pairs(json: &str, origin: &str) -> Result<Vec<QaPair>, DatasetError> {
    parse(json, origin)
}

/// Reads and parses the input file.
pub fn load_pairs(path: &Path) -> Result<Vec<QaPair>, DatasetError> {
    let pairs = parse_pairs(&read_file(path)?, &path.display().to_string())?;
    info!(path = %path.display(), records = pairs.len(), "Loaded QA pairs");
    Ok(pairs)
}

/// Reads a file previously produced by an augment run.
pub fn load_augmented(path: &Path) -> Result<Vec<AugmentedQaPair>, DatasetError> {
    let records: Vec<AugmentedQaPair> = parse(&read_file(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), records = records.len(), "Loaded augmented records");
    Ok(records)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, DatasetError> {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|source| DatasetError::Serialize { source })
}

/// Serializes `value` and writes it to `target` followed by a newline.
pub fn write_output<T: Serialize + ?Sized>(
    value: &T,
    target: &OutputTarget,
    pretty: bool,
) -> Result<(), DatasetError> {
    let mut json = to_json(value, pretty)?;
    json.push('\n');

    match target {
        OutputTarget::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(json.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|source| DatasetError::Output { source })?;
        }
        OutputTarget::File(path) => {
            fs::write(path, json).map_err(|source| DatasetError::Io {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "Wrote augmented output");
        }
    }

    Ok(())
}
