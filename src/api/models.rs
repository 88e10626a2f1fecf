use serde::{Deserialize, Serialize};

use crate::query_engine::SearchResult;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub page: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: i64,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub processing_time_ms: u128,
}
