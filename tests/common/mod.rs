//! Shared fixtures for the websearch integration tests

use std::time::Duration;

use tempfile::TempDir;
use websearch::crawl_engine::{CrawlError, CrawlResult, Crawler};
use websearch::{CrawlConfig, SearchEngine};

/// Config with an index inside `dir`
#[allow(dead_code)]
pub fn test_config(dir: &TempDir) -> CrawlConfig {
    CrawlConfig::builder()
        .index_dir(dir.path().join("indexdir"))
        .start_url("https://example.com")
        .build()
        .expect("valid test config")
}

/// Open a fresh engine over a temporary index directory
#[allow(dead_code)]
pub fn test_engine() -> (TempDir, CrawlConfig, SearchEngine) {
    let dir = TempDir::new().expect("temp dir");
    let config = test_config(&dir);
    let engine = SearchEngine::open_or_create(&config).expect("engine opens");
    (dir, config, engine)
}

/// Minimal HTML page
#[allow(dead_code)]
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n\
         <script>var tracking = 'cats dogs';</script>\n</head>\n\
         <body>\n{body}\n</body>\n</html>"
    )
}

/// In-memory crawler serving a fixed page set
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeCrawler {
    pages: Vec<(String, Option<String>)>,
    failing_urls: Vec<String>,
    fail_crawl: bool,
    crawl_delay: Option<Duration>,
    visited: Vec<String>,
    pub crawl_calls: usize,
}

#[allow(dead_code)]
impl FakeCrawler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page the crawl will visit
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.push((url.to_string(), Some(html.to_string())));
        self
    }

    /// Add a visited URL whose content is absent
    pub fn empty_page(mut self, url: &str) -> Self {
        self.pages.push((url.to_string(), None));
        self
    }

    /// Add a visited URL whose content fails to load
    pub fn failing_page(mut self, url: &str) -> Self {
        self.pages.push((url.to_string(), None));
        self.failing_urls.push(url.to_string());
        self
    }

    /// Make `crawl()` fail with a network error
    pub fn failing_crawl(mut self) -> Self {
        self.fail_crawl = true;
        self
    }

    /// Make `crawl()` take at least `delay`
    pub fn slow_crawl(mut self, delay: Duration) -> Self {
        self.crawl_delay = Some(delay);
        self
    }
}

impl Crawler for FakeCrawler {
    async fn crawl(&mut self) -> CrawlResult<()> {
        self.crawl_calls += 1;
        if let Some(delay) = self.crawl_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_crawl {
            return Err(CrawlError::NetworkError("connection refused".to_string()));
        }
        self.visited = self.pages.iter().map(|(url, _)| url.clone()).collect();
        Ok(())
    }

    fn visited_urls(&self) -> &[String] {
        &self.visited
    }

    async fn get_content(&self, url: &str) -> CrawlResult<Option<String>> {
        if self.failing_urls.iter().any(|u| u == url) {
            return Err(CrawlError::NetworkError(format!("failed to fetch {url}")));
        }
        Ok(self
            .pages
            .iter()
            .find(|(u, _)| u == url)
            .and_then(|(_, html)| html.clone()))
    }
}
