//! Shared configuration constants for websearch
//!
//! Default values used by the config builder, the crawler and the search
//! pipeline, kept in one place to avoid magic numbers.

/// Default page budget: 4000 pages
///
/// Bounds both the crawl (number of visited pages) and the number of
/// candidate documents retrieved per query.
pub const DEFAULT_MAX_PAGES: usize = 4000;

/// Start page crawled when none is configured
pub const DEFAULT_START_URL: &str = "https://vm009.rz.uos.de/crawl/index.html";

/// Default index location, relative to the working directory
pub const DEFAULT_INDEX_DIR: &str = "indexdir";

/// Default index writer memory budget: 50 MB
pub const DEFAULT_SEARCH_MEMORY_LIMIT: usize = 50_000_000;

/// Per-request HTTP timeout for the crawler
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Deadline around the whole crawl step of an index build
pub const DEFAULT_CRAWL_TIMEOUT_SECS: u64 = 600;

/// Number of past queries kept by the front end
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Tokens kept on each side of a matched term in a context snippet
pub const SNIPPET_RADIUS: usize = 4;

/// Title stored for pages without a usable `<title>` element
pub const NO_TITLE: &str = "No Title";

/// User agent sent by the HTTP crawler
pub const CRAWLER_USER_AGENT: &str = concat!("websearch/", env!("CARGO_PKG_VERSION"));
