//! Occurrence scanning over stored page text
//!
//! Candidates from the index are re-tokenized here to count how often the
//! query terms actually appear and to cut a context snippet around the last
//! occurrence.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::Document;
use crate::page_extractor::visible_text;
use crate::utils::SNIPPET_RADIUS;

/// Word runs (letters, digits, apostrophes) and single punctuation marks
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w']+|[.,!?;]").expect("TOKEN_RE: hardcoded regex is valid")
});

/// Occurrences of query terms within one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub count: usize,
    /// Token window around the last match
    pub snippet: String,
}

/// Split text into word and punctuation tokens, original case preserved
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Count tokens of `doc` whose lower-cased form is in `terms`
///
/// `terms` must already be lower-cased. Returns `None` when nothing matches.
#[must_use]
pub fn scan(doc: &Document, terms: &HashSet<String>) -> Option<Occurrence> {
    let text = visible_text(&doc.content);
    let tokens = tokenize(&text);

    let matches: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| terms.contains(&token.to_lowercase()))
        .map(|(position, _)| position)
        .collect();

    let last = *matches.last()?;
    Some(Occurrence {
        count: matches.len(),
        snippet: snippet_window(&tokens, last),
    })
}

/// Join the tokens within `SNIPPET_RADIUS` of `position`, clipped to the text
#[must_use]
pub fn snippet_window(tokens: &[&str], position: usize) -> String {
    let start = position.saturating_sub(SNIPPET_RADIUS);
    let end = (position + SNIPPET_RADIUS + 1).min(tokens.len());

    tokens
        .get(start..end)
        .unwrap_or_default()
        .join(" ")
        .replace(" .", ".")
        .replace(" ,", ",")
}
