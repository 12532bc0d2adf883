//! Getter methods for `CrawlConfig`

use std::path::PathBuf;
use std::time::Duration;

use super::types::CrawlConfig;
use crate::utils::DEFAULT_SEARCH_MEMORY_LIMIT;

impl CrawlConfig {
    #[must_use]
    pub fn index_dir(&self) -> &PathBuf {
        &self.index_dir
    }

    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    #[must_use]
    pub fn allow_subdomains(&self) -> bool {
        self.allow_subdomains
    }

    /// Writer memory budget, falling back to the 50MB default
    #[must_use]
    pub fn search_memory_limit(&self) -> usize {
        self.search_memory_limit.unwrap_or(DEFAULT_SEARCH_MEMORY_LIMIT)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn crawl_timeout(&self) -> Option<Duration> {
        self.crawl_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
