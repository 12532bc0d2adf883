//! Search query parsing

use std::collections::HashSet;
use std::fmt;

use crate::search::errors::{SearchError, SearchResult};

/// A validated, non-empty sequence of query terms
///
/// Terms come from whitespace-splitting user input and keep their original
/// form; matching against page text lower-cases them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Split `input` on whitespace into query terms
    ///
    /// Blank input is rejected with `SearchError::EmptyQuery`.
    pub fn parse(input: &str) -> SearchResult<Self> {
        let terms: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        if terms.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self { terms })
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Lower-cased terms for matching page tokens
    #[must_use]
    pub fn match_terms(&self) -> HashSet<String> {
        self.terms.iter().map(|term| term.to_lowercase()).collect()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join(" "))
    }
}
