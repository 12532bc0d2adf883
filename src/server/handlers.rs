//! HTTP handlers for the search front end

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use crate::search::{ResultEntry, SearchError, SearchQuery, suggest};

/// Query string of `GET /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub history: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ResultEntry>,
    /// Suggested query, empty when no correction applies
    pub recommendation: String,
}

/// Error returned to HTTP clients as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<SearchError> for ApiError {
    fn from(error: SearchError) -> Self {
        let status = if error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %error, "Search request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// `GET /`: recent queries
pub async fn home(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    Json(HomeResponse {
        history: state.history.lock().entries(),
    })
}

/// `GET /search?q=`: ranked results plus a spelling suggestion
///
/// A blank `q` is rejected before the index or the history is touched.
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = SearchQuery::parse(&params.q)?;
    state.history.lock().record(&query.to_string());

    let engine = state.engine.clone();
    let (results, recommendation) = tokio::task::spawn_blocking(move || {
        let results = engine.search(&query)?;
        let recommendation = suggest(&engine, &query);
        Ok::<_, SearchError>((results, recommendation))
    })
    .await
    .map_err(|e| SearchError::Other(format!("Search task panicked: {e}")))??;

    Ok(Json(SearchResponse {
        query: params.q,
        results,
        recommendation,
    }))
}
