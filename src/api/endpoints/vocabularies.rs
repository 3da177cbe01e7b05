//! Vocabulary registry endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::vocabulary::Vocabulary;

#[derive(Serialize)]
pub struct VocabularyView {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// `GET /api/vocabularies` — the fixed registry, in display order.
pub async fn list(
    State(_ctx): State<ApiContext>,
) -> Result<Json<Vec<VocabularyView>>, ApiError> {
    let vocabularies = Vocabulary::ALL
        .iter()
        .map(|v| VocabularyView {
            id: v.id(),
            name: v.name(),
            description: v.description(),
        })
        .collect();
    Ok(Json(vocabularies))
}
