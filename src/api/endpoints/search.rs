//! Concept search endpoint.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config;
use crate::search;
use crate::stats::SearchStatistics;
use crate::table::Value;
use crate::vocabulary::Vocabulary;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub mapped_only: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub vocabulary: &'static str,
    pub query: String,
    pub statistics: SearchStatistics,
    pub total_concepts: usize,
    pub showing: usize,
    pub truncated: bool,
    pub columns: Vec<String>,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub advisories: Vec<AdvisoryView>,
}

#[derive(Serialize)]
pub struct AdvisoryView {
    pub code: &'static str,
    pub message: String,
}

/// `GET /api/vocabularies/:vocab/search` — filter the unified table.
///
/// `q` empty or absent returns everything; `limit` caps the rows in the
/// response while `statistics` always cover the full filtered set.
pub async fn run(
    State(ctx): State<ApiContext>,
    Path(vocab): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let vocabulary: Vocabulary = vocab.parse()?;
    let limit = params.limit.unwrap_or(config::DEFAULT_ROWS_PER_PAGE);
    if !config::page_size_allowed(limit) {
        return Err(ApiError::InvalidPageSize(limit));
    }
    let query_text = params.q.unwrap_or_default();
    let mapped_only = params.mapped_only.unwrap_or(false);

    let catalog = ctx.portal.catalog(vocabulary)?;
    let mut results = search::all(&catalog.table).search(&query_text);
    if mapped_only {
        results = results.mapped_only();
    }
    let statistics = SearchStatistics::compute(&results);
    tracing::debug!(
        vocabulary = %vocabulary,
        query = %query_text,
        results = results.len(),
        "search executed"
    );

    let page = results.first(limit);
    let columns: Vec<String> = page
        .table()
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let rows = page
        .rows()
        .map(|row| {
            let mut object = serde_json::Map::new();
            for (column, value) in columns.iter().zip(row) {
                object.insert(column.clone(), value_to_json(value));
            }
            object
        })
        .collect();

    Ok(Json(SearchResponse {
        vocabulary: vocabulary.id(),
        query: query_text,
        statistics,
        total_concepts: catalog.total_concepts(),
        showing: page.len(),
        truncated: results.len() > limit,
        columns,
        rows,
        advisories: advisory_views(&catalog.advisories),
    }))
}

fn advisory_views(advisories: &[crate::pipeline::Advisory]) -> Vec<AdvisoryView> {
    advisories
        .iter()
        .map(|advisory| AdvisoryView {
            code: advisory.code(),
            message: advisory.to_string(),
        })
        .collect()
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(n) => serde_json::Value::from(*n),
        Value::Text(text) => serde_json::Value::from(text.as_str()),
        Value::Null => serde_json::Value::Null,
    }
}
