//! Model-free extractor used when no NER model is configured.
//!
//! Runs of capitalized words become entities. A run containing an acronym
//! (`QHSE`, `ISO`) is labeled `ORG`; other runs are `MISC`. A capitalized word
//! opening a sentence only counts when it is an acronym.

use crate::constants::{STUB_ACRONYM_LABEL, STUB_DEFAULT_LABEL};
use crate::ner::decode::Entity;

struct StubWord<'a> {
    start: usize,
    core: &'a str,
    /// Trailing punctuation closes the current run.
    closes_run: bool,
    ends_sentence: bool,
}

fn is_acronym(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && word
            .chars()
            .all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '&')
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn push_word<'a>(text: &'a str, start: usize, end: usize, words: &mut Vec<StubWord<'a>>) {
    let raw = &text[start..end];
    let leading = raw.len() - raw.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let core = raw.trim_matches(|c: char| !c.is_alphanumeric());
    if core.is_empty() {
        return;
    }
    let trailing = &raw[leading + core.len()..];
    words.push(StubWord {
        start: start + leading,
        core,
        closes_run: !trailing.is_empty(),
        ends_sentence: trailing.contains(['.', '?', '!']),
    });
}

fn split_words(text: &str) -> Vec<StubWord<'_>> {
    let mut words = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        match (c.is_whitespace(), word_start) {
            (true, Some(start)) => {
                push_word(text, start, idx, &mut words);
                word_start = None;
            }
            (false, None) => word_start = Some(idx),
            _ => {}
        }
    }
    if let Some(start) = word_start {
        push_word(text, start, text.len(), &mut words);
    }

    words
}

/// Extracts entities with the capitalization heuristic.
pub fn extract_stub(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    // (start, end, has_acronym)
    let mut run: Option<(usize, usize, bool)> = None;
    let mut sentence_start = true;

    let flush = |run: &mut Option<(usize, usize, bool)>, entities: &mut Vec<Entity>| {
        if let Some((start, end, has_acronym)) = run.take() {
            let label = if has_acronym {
                STUB_ACRONYM_LABEL
            } else {
                STUB_DEFAULT_LABEL
            };
            entities.push(Entity::new(&text[start..end], label));
        }
    };

    for word in split_words(text) {
        let acronym = is_acronym(word.core);
        let numeric_tail = run.is_some() && word.core.chars().all(|c| c.is_ascii_digit());
        let qualifies = if sentence_start {
            acronym
        } else {
            is_capitalized(word.core) || numeric_tail
        };

        if qualifies {
            let end = word.start + word.core.len();
            run = match run {
                Some((start, _, has_acronym)) => Some((start, end, has_acronym || acronym)),
                None => Some((word.start, end, acronym)),
            };
        } else {
            flush(&mut run, &mut entities);
        }

        if word.closes_run {
            flush(&mut run, &mut entities);
        }
        sentence_start = word.ends_sentence;
    }
    flush(&mut run, &mut entities);

    entities
}
