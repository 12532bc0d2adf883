//! Error types for search operations
//!
//! This module defines the index and query error types together with the
//! retry configuration used for transient failures.

use std::time::Duration;
use tantivy::TantivyError;
use thiserror::Error;

use crate::crawl_engine::CrawlError;

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Error types for search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query string was empty or only whitespace
    #[error("Search query must contain at least one term")]
    EmptyQuery,

    /// Query parsing failed
    #[error("Invalid search query: {0}")]
    QueryParsing(String),

    /// Search execution failed
    #[error("Search execution failed: {0}")]
    SearchExecution(String),

    /// Indexing operation failed
    #[error("Indexing failed for document {doc_id}: {message}")]
    IndexingFailed { doc_id: String, message: String },

    /// Index writer acquisition failed (transient)
    #[error("Failed to acquire index writer (retry recommended): {0}")]
    WriterAcquisition(String),

    /// Index commit failed
    #[error("Failed to commit index changes: {0}")]
    CommitFailed(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Crawl step of an index build failed
    #[error("Crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tantivy error wrapper
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] TantivyError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SearchError {
    /// Check if error is transient and should be retried
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SearchError::WriterAcquisition(_) | SearchError::Io(_) | SearchError::CommitFailed(_)
        )
    }

    /// Get suggested retry delay for transient errors
    #[must_use]
    pub fn retry_delay(&self) -> Option<Duration> {
        if self.is_transient() {
            Some(Duration::from_millis(100))
        } else {
            None
        }
    }

    /// Whether the error was caused by the request rather than the engine
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::EmptyQuery | SearchError::QueryParsing(_))
    }
}

/// Retry configuration for search operations
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_attempts: u32,
    /// Initial retry delay
    pub initial_delay: Duration,
    /// Backoff multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Maximum retry delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Calculate delay for given attempt number (0-based)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = (self.initial_delay.as_millis() as f64 * multiplier) as u64;

        Duration::from_millis(delay_ms).min(self.max_delay)
    }
}
