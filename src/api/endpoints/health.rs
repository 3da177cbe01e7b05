//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub cached_vocabularies: Vec<String>,
}

/// `GET /api/health` — liveness check plus which catalogs are warm.
pub async fn check(
    State(ctx): State<ApiContext>,
) -> Result<Json<HealthResponse>, ApiError> {
    let cached = ctx
        .portal
        .cached_vocabularies()
        .map_err(ApiError::from)?
        .into_iter()
        .map(|v| v.id().to_string())
        .collect();

    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        cached_vocabularies: cached,
    }))
}
