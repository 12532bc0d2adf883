//! Core types and traits for web crawling operations.
//!
//! This module contains the crawl error type and the `Crawler` trait the
//! indexer consumes. The indexer only depends on this interface, never on a
//! concrete crawler.

use std::fmt;
use std::future::Future;

/// Custom error type for crawl operations
#[derive(Debug, Clone)]
pub enum CrawlError {
    /// Configuration error
    ConfigError(String),
    /// Network error
    NetworkError(String),
    /// Crawl exceeded its deadline
    Timeout(u64),
}

impl fmt::Display for CrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::NetworkError(msg) => write!(f, "Network error: {msg}"),
            Self::Timeout(secs) => write!(f, "Crawl did not finish within {secs}s"),
        }
    }
}

impl std::error::Error for CrawlError {}

impl From<reqwest::Error> for CrawlError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkError(err.to_string())
    }
}

/// Convenience alias for Result with `CrawlError`
pub type CrawlResult<T> = Result<T, CrawlError>;

/// A trait defining the interface for web crawlers.
///
/// A crawler discovers and fetches a bounded set of pages. After `crawl()`
/// returns, `visited_urls()` lists the pages in visit order and
/// `get_content()` hands out their raw HTML.
pub trait Crawler: Send {
    /// Discover and fetch pages up to the page budget.
    fn crawl(&mut self) -> impl Future<Output = CrawlResult<()>> + Send;

    /// URLs visited by the last crawl, in visit order.
    fn visited_urls(&self) -> &[String];

    /// Raw HTML for a visited URL, `None` when there is nothing to index.
    fn get_content(&self, url: &str) -> impl Future<Output = CrawlResult<Option<String>>> + Send;
}
