//! Core Tantivy search engine implementation
//!
//! This module provides the main `SearchEngine` that owns the index handle,
//! hands out writers for index builds and executes search queries.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tantivy::{Index, IndexReader, IndexWriter};

use super::errors::{RetryConfig, SearchError, SearchResult};
use super::query::{self, SearchQuery};
use super::runtime_helpers::retry_task;
use super::schema::SearchSchema;
use super::suggest::collect_vocabulary;
use super::types::{IndexStats, ResultEntry};
use crate::config::CrawlConfig;

/// Main search engine managing Tantivy index operations
///
/// Clones share the index, the reader and the cached `content` vocabulary,
/// so a commit through one clone is visible to all of them.
#[derive(Clone)]
pub struct SearchEngine {
    index: Index,
    schema: SearchSchema,
    reader: IndexReader,
    vocabulary: Arc<RwLock<Arc<BTreeSet<String>>>>,
    index_path: PathBuf,
    memory_limit: usize,
    max_pages: usize,
}

impl SearchEngine {
    /// Open the index at the configured location, creating it if needed
    pub fn open_or_create(config: &CrawlConfig) -> Result<Self> {
        let index_dir = config.index_dir();

        std::fs::create_dir_all(index_dir)
            .with_context(|| format!("Failed to create index directory: {index_dir:?}"))?;

        let schema = SearchSchema::new();

        let index = if index_exists(index_dir) {
            let existing_index = Index::open_in_dir(index_dir)
                .with_context(|| format!("Failed to open existing index at {index_dir:?}"))?;

            if let Err(e) = SearchSchema::validate(&existing_index.schema()) {
                tracing::warn!(
                    error = %e,
                    index_dir = ?index_dir,
                    "Schema mismatch detected - recreating index"
                );
                drop(existing_index);

                std::fs::remove_dir_all(index_dir)
                    .with_context(|| format!("Failed to remove old index at {index_dir:?}"))?;
                std::fs::create_dir_all(index_dir).with_context(|| {
                    format!("Failed to recreate index directory at {index_dir:?}")
                })?;
                Index::create_in_dir(index_dir, schema.schema.clone())
                    .with_context(|| "Failed to create new Tantivy index")?
            } else {
                existing_index
            }
        } else {
            Index::create_in_dir(index_dir, schema.schema.clone())
                .with_context(|| "Failed to create new Tantivy index")?
        };

        // Field handles must come from the schema the index was opened with
        let schema = SearchSchema::from_index(&index)?;

        let reader = index
            .reader()
            .with_context(|| "Failed to create index reader")?;

        let vocabulary = collect_vocabulary(&reader.searcher(), schema.content)
            .context("Failed to read index vocabulary")?;

        Ok(SearchEngine {
            index,
            schema,
            reader,
            vocabulary: Arc::new(RwLock::new(Arc::new(vocabulary))),
            index_path: index_dir.clone(),
            memory_limit: config.search_memory_limit(),
            max_pages: config.max_pages(),
        })
    }

    /// Get a reference to the search schema
    #[must_use]
    pub fn schema(&self) -> &SearchSchema {
        &self.schema
    }

    /// Get the Tantivy index
    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the index reader
    #[must_use]
    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    /// Distinct `content` terms as of the last commit
    #[must_use]
    pub fn vocabulary(&self) -> Arc<BTreeSet<String>> {
        self.vocabulary.read().clone()
    }

    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Number of documents visible to searches
    #[must_use]
    pub fn document_count(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// True iff the index location exists and holds at least one document
    #[must_use]
    pub fn is_index_built(&self) -> bool {
        index_exists(&self.index_path) && self.document_count() > 0
    }

    /// Create an index writer with the configured memory limit
    pub fn writer(&self) -> SearchResult<IndexWriter> {
        let limit = self.memory_limit;
        self.index.writer(limit).map_err(|e| {
            SearchError::WriterAcquisition(format!(
                "Failed to acquire index writer with {}MB limit: {}",
                limit / 1_000_000,
                e
            ))
        })
    }

    /// Create an index writer, retrying while another writer holds the lock
    ///
    /// Uses default retry config: 3 retries, 100ms initial delay, 2x backoff, 5s max delay.
    pub async fn writer_with_retry(&self) -> SearchResult<IndexWriter> {
        let engine = self.clone();

        retry_task(RetryConfig::default(), move || {
            let eng = engine.clone();
            async move { eng.writer() }
        })
        .await
    }

    /// Commit a writer's pending documents, reload the reader and refresh
    /// the cached vocabulary
    ///
    /// The writer is consumed and its lock released once the commit lands.
    pub async fn commit(&self, mut writer: IndexWriter) -> SearchResult<()> {
        let start = std::time::Instant::now();
        let engine = self.clone();

        tokio::task::spawn_blocking(move || -> SearchResult<()> {
            writer
                .commit()
                .map_err(|e| SearchError::CommitFailed(format!("Index commit failed: {e}")))?;
            drop(writer);

            engine
                .reader
                .reload()
                .map_err(|e| SearchError::Other(format!("Failed to reload reader: {e}")))?;

            let vocabulary =
                collect_vocabulary(&engine.reader.searcher(), engine.schema.content)?;
            *engine.vocabulary.write() = Arc::new(vocabulary);

            tracing::debug!(
                duration_ms = start.elapsed().as_millis(),
                "Index commit and reload completed"
            );
            Ok(())
        })
        .await
        .map_err(|e| SearchError::Other(format!("Commit task panicked: {e}")))?
    }

    /// Run a query through retrieval, occurrence scanning and ranking
    pub fn search(&self, query: &SearchQuery) -> SearchResult<Vec<ResultEntry>> {
        query::search(self, query, self.max_pages)
    }

    /// Get index statistics
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let searcher = self.reader.searcher();
        IndexStats {
            num_documents: searcher.num_docs(),
            num_segments: searcher.segment_readers().len(),
        }
    }
}

/// An index lives in `dir` once tantivy has written its `meta.json`
fn index_exists(dir: &Path) -> bool {
    dir.join("meta.json").exists()
}

impl SearchSchema {
    /// Resolve field handles from an opened index
    pub fn from_index(index: &Index) -> Result<Self> {
        let schema = index.schema();
        let field = |name: &str| {
            schema
                .get_field(name)
                .with_context(|| format!("Field '{name}' missing from index schema"))
        };

        Ok(Self {
            url: field("url")?,
            content: field("content")?,
            title: field("title")?,
            schema: schema.clone(),
        })
    }
}
