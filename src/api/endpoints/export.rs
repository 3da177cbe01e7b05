//! CSV export endpoint.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::export;
use crate::search;
use crate::vocabulary::Vocabulary;

#[derive(Deserialize)]
pub struct ExportQuery {
    pub q: Option<String>,
    pub mapped_only: Option<bool>,
}

/// `GET /api/vocabularies/:vocab/export` — the current filtered view as a
/// CSV attachment. No row cap: exports always carry the full result set.
pub async fn download(
    State(ctx): State<ApiContext>,
    Path(vocab): Path<String>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let vocabulary: Vocabulary = vocab.parse()?;
    let query_text = params.q.unwrap_or_default();
    let mapped_only = params.mapped_only.unwrap_or(false);

    let catalog = ctx.portal.catalog(vocabulary)?;
    let mut results = search::all(&catalog.table).search(&query_text);
    if mapped_only {
        results = results.mapped_only();
    }

    let bytes = export::write_csv(&results)?;
    tracing::info!(
        vocabulary = %vocabulary,
        rows = results.len(),
        bytes = bytes.len(),
        "CSV export"
    );

    let filename = export::export_filename(vocabulary.id());
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes))
}
