//! Common types used across the search module

use serde::{Deserialize, Serialize};

/// A crawled page as stored in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub content: String,
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Number of query-term occurrences in the page text, always at least 1
    pub occurrence_count: usize,
    /// Window of text around the last occurrence
    pub context_snippet: String,
    pub url: String,
    pub title: String,
}

/// Outcome of an index build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents written in this build
    pub indexed: usize,
    /// Visited pages left out (no content, fetch failure, duplicate URL)
    pub skipped: usize,
    /// The index already held documents, nothing was crawled
    pub already_built: bool,
}

/// Index statistics information
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub num_documents: u64,
    pub num_segments: usize,
}
