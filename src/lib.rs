//! Crawl a bounded set of pages, index them and answer ranked multi-term
//! queries.

pub mod config;
pub mod crawl_engine;
pub mod page_extractor;
pub mod search;
pub mod server;
pub mod utils;

pub use config::CrawlConfig;
pub use crawl_engine::{CrawlError, CrawlResult, Crawler, HttpCrawler};
pub use search::{
    BuildReport, Document, PageIndexer, ResultEntry, SearchEngine, SearchError, SearchQuery,
    SearchResult,
};
pub use server::{AppState, SearchHistory, router, serve};

/// Crawl with the default HTTP crawler and build the index at the configured
/// location, unless it already holds documents
pub async fn build_index(config: &CrawlConfig) -> anyhow::Result<BuildReport> {
    use anyhow::Context;

    let engine = SearchEngine::open_or_create(config)?;
    let mut crawler = HttpCrawler::new(config.clone()).context("Failed to create crawler")?;
    let report = PageIndexer::new(engine, config)
        .build_index(&mut crawler)
        .await
        .context("Failed to build search index")?;
    Ok(report)
}
