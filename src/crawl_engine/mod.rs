//! Crawl Engine Module
//!
//! The crawler is the indexer's page source: it discovers a bounded set of
//! pages from a start URL and hands out their raw HTML. The `Crawler` trait
//! is the only thing the indexer depends on; `HttpCrawler` is the bundled
//! implementation.

// Sub-modules
pub mod crawl_types;
pub mod crawler;

// Re-export crawler types and functions
pub use crawler::{HttpCrawler, extract_links, should_visit_url};

// Re-export crawl types
pub use crawl_types::{CrawlError, CrawlResult, Crawler};
