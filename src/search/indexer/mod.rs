//! Index build pipeline for crawled pages
//!
//! A build runs the crawler, cleans every visited page and writes one
//! document per unique URL through a single writer. The writer is committed
//! once at the end; any failure before that point drops it uncommitted so a
//! build either lands completely or not at all.

use std::time::{Duration, Instant};

use ahash::AHashSet;
use tantivy::{IndexWriter, TantivyDocument};

use super::engine::SearchEngine;
use super::errors::{SearchError, SearchResult};
use super::types::{BuildReport, Document};
use crate::config::CrawlConfig;
use crate::crawl_engine::{CrawlError, Crawler};
use crate::page_extractor::{clean_text, extract_title};

/// Builds the page index from a crawler's output
#[derive(Clone)]
pub struct PageIndexer {
    engine: SearchEngine,
    crawl_timeout: Option<Duration>,
}

impl PageIndexer {
    #[must_use]
    pub fn new(engine: SearchEngine, config: &CrawlConfig) -> Self {
        Self {
            engine,
            crawl_timeout: config.crawl_timeout(),
        }
    }

    /// Crawl and index, unless the index already holds documents
    ///
    /// Crawl failures abort the build. A page whose content cannot be
    /// fetched, or is absent, is skipped.
    pub async fn build_index<C: Crawler>(&self, crawler: &mut C) -> SearchResult<BuildReport> {
        if self.engine.is_index_built() {
            tracing::info!(
                documents = self.engine.document_count(),
                index_dir = ?self.engine.index_path(),
                "Index already built, skipping crawl"
            );
            return Ok(BuildReport {
                already_built: true,
                ..BuildReport::default()
            });
        }

        let start = Instant::now();
        self.crawl(crawler).await?;

        let mut writer = self.engine.writer_with_retry().await?;
        let mut report = BuildReport::default();
        let mut seen_urls = AHashSet::with_capacity(crawler.visited_urls().len());

        let urls: Vec<String> = crawler.visited_urls().to_vec();
        for url in urls {
            if !seen_urls.insert(url.clone()) {
                report.skipped += 1;
                continue;
            }

            let raw = match crawler.get_content(&url).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to load page content, skipping");
                    report.skipped += 1;
                    continue;
                }
            };

            let Some(document) = prepare_page(url, raw.as_deref()) else {
                report.skipped += 1;
                continue;
            };

            self.add_document(&mut writer, document)?;
            report.indexed += 1;
        }

        self.engine.commit(writer).await?;

        tracing::info!(
            indexed = report.indexed,
            skipped = report.skipped,
            duration_ms = start.elapsed().as_millis(),
            "Index build completed"
        );

        Ok(report)
    }

    async fn crawl<C: Crawler>(&self, crawler: &mut C) -> SearchResult<()> {
        match self.crawl_timeout {
            Some(limit) => tokio::time::timeout(limit, crawler.crawl())
                .await
                .map_err(|_| CrawlError::Timeout(limit.as_secs()))??,
            None => crawler.crawl().await?,
        }
        Ok(())
    }

    fn add_document(&self, writer: &mut IndexWriter, document: Document) -> SearchResult<()> {
        let schema = self.engine.schema();
        let mut doc = TantivyDocument::default();
        doc.add_text(schema.url, &document.url);
        doc.add_text(schema.content, &document.content);
        doc.add_text(schema.title, &document.title);

        writer
            .add_document(doc)
            .map_err(|e| SearchError::IndexingFailed {
                doc_id: document.url,
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// Turn a fetched page into an indexable document
///
/// Returns `None` when the page has no content.
#[must_use]
pub fn prepare_page(url: String, raw_html: Option<&str>) -> Option<Document> {
    let content = clean_text(raw_html)?;
    let title = raw_html.map(extract_title)?;
    Some(Document {
        url,
        title,
        content,
    })
}
