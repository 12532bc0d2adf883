//! Full-text indexing and ranked search over crawled pages
//!
//! Pages are cleaned and written into a Tantivy index once per index
//! location. Queries require every term to appear in page content; the
//! candidates are re-scanned for exact occurrence counts and snippets, then
//! deduplicated by title and ranked by count.

pub mod engine;
pub mod errors;
pub mod indexer;
pub mod query;
pub mod ranking;
pub mod runtime_helpers;
pub mod scanner;
pub mod schema;
pub mod suggest;
pub mod types;

pub use engine::SearchEngine;
pub use errors::{RetryConfig, SearchError, SearchResult};
pub use indexer::{PageIndexer, prepare_page};
pub use query::{SearchQuery, retrieve, search};
pub use ranking::finalize;
pub use runtime_helpers::retry_task;
pub use scanner::{Occurrence, scan, snippet_window, tokenize};
pub use schema::{SchemaError, SearchSchema};
pub use suggest::suggest;
pub use types::{BuildReport, Document, IndexStats, ResultEntry};
