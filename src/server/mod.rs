//! HTTP front end over the search engine
//!
//! The server owns the only mutable state (query history); the engine is a
//! shared read-only handle once the index is built.

pub mod handlers;
pub mod history;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use parking_lot::Mutex;

use crate::config::CrawlConfig;
use crate::search::SearchEngine;

pub use handlers::{ApiError, HomeResponse, SearchParams, SearchResponse, home, search_handler};
pub use history::SearchHistory;

/// Shared state behind every request
pub struct AppState {
    pub engine: SearchEngine,
    pub history: Mutex<SearchHistory>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: SearchEngine, history_capacity: usize) -> Self {
        Self {
            engine,
            history: Mutex::new(SearchHistory::new(history_capacity)),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search_handler))
        .with_state(state)
}

/// Build the index if needed, then serve on `addr` until shutdown
pub async fn serve(config: CrawlConfig, addr: SocketAddr) -> Result<()> {
    let report = crate::build_index(&config).await?;
    let engine = SearchEngine::open_or_create(&config)?;
    let stats = engine.stats();
    tracing::info!(
        indexed = report.indexed,
        already_built = report.already_built,
        documents = stats.num_documents,
        segments = stats.num_segments,
        "Search index ready"
    );

    let state = Arc::new(AppState::new(engine, config.history_capacity()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, router(state))
        .await
        .context("HTTP server failed")?;
    Ok(())
}
