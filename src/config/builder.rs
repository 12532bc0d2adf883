//! Type-safe builder for `CrawlConfig` using the typestate pattern
//!
//! The builder only exposes `build()` once both the index location and the
//! start URL have been provided.

use anyhow::{Context, Result, anyhow};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use url::Url;

use super::types::CrawlConfig;

// Type states for the builder
pub struct WithIndexDir;
pub struct WithStartUrl;

pub struct CrawlConfigBuilder<State = ()> {
    pub(crate) config: CrawlConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for CrawlConfigBuilder<()> {
    fn default() -> Self {
        Self {
            config: CrawlConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl CrawlConfig {
    /// Create a builder for configuring a `CrawlConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> CrawlConfigBuilder<()> {
        CrawlConfigBuilder::default()
    }

    /// Load a configuration from a JSON file
    ///
    /// Keys missing from the file take their default values. The loaded
    /// config goes through the same validation as `build()`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;
        let mut config: CrawlConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {path:?}"))?;
        config.start_url = normalize_start_url(&config.start_url);
        validate(&config)?;
        Ok(config)
    }

    /// Reopen a complete config for further adjustment
    #[must_use]
    pub fn into_builder(self) -> CrawlConfigBuilder<WithStartUrl> {
        CrawlConfigBuilder {
            config: self,
            _phantom: PhantomData,
        }
    }
}

impl CrawlConfigBuilder<()> {
    pub fn index_dir(self, dir: impl Into<PathBuf>) -> CrawlConfigBuilder<WithIndexDir> {
        let mut config = self.config;
        config.index_dir = dir.into();
        CrawlConfigBuilder {
            config,
            _phantom: PhantomData,
        }
    }
}

impl CrawlConfigBuilder<WithIndexDir> {
    pub fn start_url(self, url: impl Into<String>) -> CrawlConfigBuilder<WithStartUrl> {
        let mut config = self.config;
        config.start_url = normalize_start_url(&url.into());
        CrawlConfigBuilder {
            config,
            _phantom: PhantomData,
        }
    }
}

// Optional settings are available in every state
impl<State> CrawlConfigBuilder<State> {
    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn allow_subdomains(mut self, allow: bool) -> Self {
        self.config.allow_subdomains = allow;
        self
    }

    #[must_use]
    pub fn search_memory_limit(mut self, bytes: Option<usize>) -> Self {
        self.config.search_memory_limit = bytes;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn crawl_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.crawl_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }
}
// Build method only available when all required fields are set
impl CrawlConfigBuilder<WithStartUrl> {
    pub fn replace_index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.index_dir = dir.into();
        self
    }

    pub fn replace_start_url(mut self, url: impl Into<String>) -> Self {
        self.config.start_url = normalize_start_url(&url.into());
        self
    }

    pub fn build(self) -> Result<CrawlConfig> {
        validate(&self.config)?;
        Ok(self.config)
    }
}

/// Add `https://` when the URL has no scheme
fn normalize_start_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn validate(config: &CrawlConfig) -> Result<()> {
    if config.max_pages == 0 {
        return Err(anyhow!("max_pages must be at least 1"));
    }
    if config.history_capacity == 0 {
        return Err(anyhow!("history_capacity must be at least 1"));
    }
    Url::parse(&config.start_url)
        .map_err(|e| anyhow!("Invalid start_url '{}': {e}", config.start_url))?;
    Ok(())
}
