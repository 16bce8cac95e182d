//! Fixed replies checked before embedding search.
//!
//! A responses file is a JSON object mapping phrases to replies, e.g.
//! `{"hello": "Hello! How can I assist you today?"}`. Phrases and queries are
//! compared after [`normalize_query`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::info;

use crate::dataset::{DatasetError, read_file};

/// Lowercases `query` and re-joins its word tokens with single spaces.
///
/// A token is a run of alphanumeric characters or `_`; anything else separates
/// tokens, so `"What's up?"` becomes `"what s up"`.
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Phrase → reply table keyed by normalized phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CannedResponses {
    replies: HashMap<String, String>,
}

impl CannedResponses {
    /// Builds the table. When two phrases normalize to the same key the first
    /// one wins; phrases with no word tokens are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut replies = HashMap::new();
        for (phrase, reply) in pairs {
            let key = normalize_query(&phrase);
            if !key.is_empty() {
                replies.entry(key).or_insert(reply);
            }
        }
        Self { replies }
    }

    pub fn parse(json: &str, origin: &str) -> Result<Self, DatasetError> {
        let table: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| DatasetError::Parse {
                origin: origin.to_string(),
                source: e,
            })?;
        Ok(Self::from_pairs(table))
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let responses = Self::parse(&read_file(path)?, &path.display().to_string())?;
        info!(path = %path.display(), phrases = responses.len(), "Loaded canned responses");
        Ok(responses)
    }

    /// The reply whose phrase equals the normalized `query`.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        self.replies
            .get(&normalize_query(query))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}
