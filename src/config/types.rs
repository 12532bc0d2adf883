//! Core configuration types for crawling, indexing and searching
//!
//! This module contains the main `CrawlConfig` struct that every component
//! reads its parameters from.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{
    CRAWLER_USER_AGENT, DEFAULT_CRAWL_TIMEOUT_SECS, DEFAULT_HISTORY_CAPACITY, DEFAULT_INDEX_DIR,
    DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Main configuration struct for crawl, index and search operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Location of the on-disk index.
    pub(crate) index_dir: PathBuf,

    /// First page of the crawl. Always carries a scheme (normalized in builder).
    pub(crate) start_url: String,

    /// Page budget.
    ///
    /// Caps the number of pages the crawler visits and the number of
    /// candidate documents retrieved for a query.
    ///
    /// Default: 4000
    pub(crate) max_pages: usize,

    /// Follow links into subdomains of the start host
    pub(crate) allow_subdomains: bool,

    /// Index writer memory budget in bytes (defaults to 50MB when unset)
    pub(crate) search_memory_limit: Option<usize>,

    /// Timeout in seconds for a single page fetch
    ///
    /// Default: 30 seconds
    pub(crate) request_timeout_secs: Option<u64>,

    /// Deadline in seconds around the crawl step of an index build
    ///
    /// `None` lets the crawl run to completion however long it takes.
    ///
    /// Default: 600 seconds
    pub(crate) crawl_timeout_secs: Option<u64>,

    /// Number of past queries the front end remembers
    pub(crate) history_capacity: usize,

    pub(crate) user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
            start_url: String::new(),
            max_pages: DEFAULT_MAX_PAGES,
            allow_subdomains: false,
            search_memory_limit: None,
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            crawl_timeout_secs: Some(DEFAULT_CRAWL_TIMEOUT_SECS),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            user_agent: CRAWLER_USER_AGENT.to_string(),
        }
    }
}
