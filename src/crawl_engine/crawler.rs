use ahash::{AHashMap, AHashSet};
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use std::collections::VecDeque;
use std::sync::LazyLock;
use url::Url;

use super::crawl_types::{CrawlError, CrawlResult, Crawler};
use crate::config::CrawlConfig;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("LINK_SELECTOR: hardcoded selector is valid")
});

/// Breadth-first HTTP crawler bounded by the configured page budget.
///
/// Pages are fetched with `reqwest` and kept in memory until the indexer asks
/// for them. Only successful HTML responses count towards the budget.
pub struct HttpCrawler {
    config: CrawlConfig,
    client: reqwest::Client,
    visited: Vec<String>,
    pages: AHashMap<String, String>,
}

impl HttpCrawler {
    pub fn new(config: CrawlConfig) -> CrawlResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CrawlError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            visited: Vec::new(),
            pages: AHashMap::new(),
        })
    }

    /// Fetch one page, returning `None` for non-HTML responses
    async fn fetch_page(&self, url: &str) -> CrawlResult<Option<String>> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_none_or(|content_type| content_type.contains("text/html"));
        if !is_html {
            return Ok(None);
        }

        Ok(Some(response.text().await?))
    }
}

impl Crawler for HttpCrawler {
    async fn crawl(&mut self) -> CrawlResult<()> {
        let start_url = Url::parse(self.config.start_url()).map_err(|e| {
            CrawlError::ConfigError(format!("Invalid start URL '{}': {e}", self.config.start_url()))
        })?;
        let budget = self.config.max_pages();

        self.visited.clear();
        self.pages.clear();

        let mut seen = AHashSet::new();
        seen.insert(start_url.to_string());
        let mut queue = VecDeque::from([start_url.to_string()]);
        let mut is_start_page = true;

        while let Some(url) = queue.pop_front() {
            if self.visited.len() >= budget {
                break;
            }

            let html = match self.fetch_page(&url).await {
                Ok(Some(html)) => html,
                Ok(None) => {
                    tracing::debug!(url = %url, "Skipping non-HTML response");
                    is_start_page = false;
                    continue;
                }
                // Nothing to crawl without the first page
                Err(e) if is_start_page => return Err(e),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to fetch page, skipping");
                    continue;
                }
            };
            is_start_page = false;

            for link in extract_links(&html, &url) {
                if should_visit_url(&link, &self.config) && seen.insert(link.clone()) {
                    queue.push_back(link);
                }
            }

            tracing::debug!(url = %url, visited = self.visited.len() + 1, "Page fetched");
            self.visited.push(url.clone());
            self.pages.insert(url, html);
        }

        tracing::info!(
            start_url = %start_url,
            visited = self.visited.len(),
            budget = budget,
            "Crawl finished"
        );
        Ok(())
    }

    fn visited_urls(&self) -> &[String] {
        &self.visited
    }

    async fn get_content(&self, url: &str) -> CrawlResult<Option<String>> {
        Ok(self.pages.get(url).cloned())
    }
}

/// Extract absolute, fragment-free links from a page.
///
/// Relative links are resolved against `base_url`. `javascript:`, `mailto:`
/// and `tel:` links are dropped.
#[must_use]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        let href_lc = href.to_ascii_lowercase();
        if href_lc.starts_with("javascript:")
            || href_lc.starts_with("mailto:")
            || href_lc.starts_with("tel:")
        {
            continue;
        }

        let Ok(mut absolute) = base.join(href) else {
            continue;
        };
        absolute.set_fragment(None);
        links.push(absolute.to_string());
    }

    links
}

/// Check whether a discovered URL stays inside the crawl scope.
///
/// The URL must share the start URL's scheme and host, or be a subdomain of
/// it when `allow_subdomains` is set.
#[must_use]
pub fn should_visit_url(url: &str, config: &CrawlConfig) -> bool {
    let Ok(parsed_url) = Url::parse(url) else {
        return false;
    };
    let Ok(start_url) = Url::parse(config.start_url()) else {
        return false;
    };

    if parsed_url.scheme() != start_url.scheme() {
        return false;
    }

    let url_host = parsed_url.host_str().unwrap_or_default();
    let start_host = start_url.host_str().unwrap_or_default();

    url_host == start_host
        || config.allow_subdomains() && url_host.ends_with(&format!(".{start_host}"))
}
