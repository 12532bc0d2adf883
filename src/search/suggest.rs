//! Spelling suggestions from the index vocabulary
//!
//! Every query word is replaced by the closest term (Levenshtein distance)
//! that actually occurs in indexed page content. The vocabulary is collected
//! once per commit and cached by `SearchEngine`.

use std::collections::BTreeSet;

use tantivy::Searcher;
use tantivy::schema::Field;

use super::engine::SearchEngine;
use super::errors::SearchResult;
use super::query::SearchQuery;

/// Suggest a corrected query, or an empty string when nothing changes
///
/// Words already present in the vocabulary are kept. Among equally close
/// candidates the lexicographically first term is chosen.
#[must_use]
pub fn suggest(engine: &SearchEngine, query: &SearchQuery) -> String {
    let vocabulary = engine.vocabulary();
    if vocabulary.is_empty() {
        return String::new();
    }

    let original: Vec<String> = query.terms().iter().map(|t| t.to_lowercase()).collect();
    let corrected: Vec<&str> = original
        .iter()
        .map(|word| closest_term(word, &vocabulary).unwrap_or(word.as_str()))
        .collect();

    if corrected.iter().zip(&original).all(|(c, o)| *c == o.as_str()) {
        return String::new();
    }

    let suggestion = corrected.join(" ");
    tracing::debug!(query = %query, suggestion = %suggestion, "Suggested correction");
    suggestion
}

/// Every distinct term of `field` across all segments
pub fn collect_vocabulary(searcher: &Searcher, field: Field) -> SearchResult<BTreeSet<String>> {
    let mut terms = BTreeSet::new();

    for segment_reader in searcher.segment_readers() {
        let inverted_index = segment_reader.inverted_index(field)?;
        let mut stream = inverted_index.terms().stream()?;
        while stream.advance() {
            if let Ok(term) = std::str::from_utf8(stream.key()) {
                terms.insert(term.to_string());
            }
        }
    }

    Ok(terms)
}

/// Nearest vocabulary term to `word`, `word` itself when it is known
fn closest_term<'a>(word: &str, vocabulary: &'a BTreeSet<String>) -> Option<&'a str> {
    if let Some(known) = vocabulary.get(word) {
        return Some(known.as_str());
    }
    vocabulary
        .iter()
        .min_by_key(|term| strsim::levenshtein(word, term))
        .map(String::as_str)
}
