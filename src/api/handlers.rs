use axum::{Json, extract::Query, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::CONFIG;
use crate::error::SearchError;
use crate::query_engine::QueryEngine;

use super::models::{SearchParams, SearchResponse};

pub async fn search_handler(
    State(query_engine): State<Arc<QueryEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();

    if params.page < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "page must be non-negative".to_string(),
        ));
    }

    // Per-request deadline. The timer task holds its own token clone, so it
    // is harmless when the request finishes first.
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(CONFIG.search_timeout_ms)).await;
        deadline.cancel();
    });

    let results = query_engine
        .search(&params.q, params.page, &cancel)
        .await
        .map_err(|e| {
            tracing::warn!(query = %params.q, page = params.page, "search failed: {e:#}");
            match e {
                SearchError::Canceled => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "Search timed out".to_string(),
                ),
                SearchError::Connection(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Search backend unavailable".to_string(),
                ),
                SearchError::QueryExecution(_) | SearchError::RowDecode(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Search error: {}", e),
                ),
            }
        })?;

    let total_results = results.len();
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SearchResponse {
        query: params.q,
        page: params.page,
        results,
        total_results,
        processing_time_ms,
    }))
}
