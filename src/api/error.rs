//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::export::ExportError;
use crate::portal::PortalError;
use crate::vocabulary::UnknownVocabulary;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown vocabulary: {0}")]
    UnknownVocabulary(String),
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::UnknownVocabulary(name) => (
                StatusCode::BAD_REQUEST,
                "unknown_vocabulary",
                format!("Unknown vocabulary: {name}"),
            ),
            ApiError::InvalidPageSize(size) => (
                StatusCode::BAD_REQUEST,
                "invalid_page_size",
                format!(
                    "Invalid page size {size}, allowed: {:?}",
                    crate::config::ROWS_PER_PAGE_OPTIONS
                ),
            ),
            ApiError::Export(detail) => {
                tracing::error!(detail, "CSV export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "export_failed",
                    "Export failed".to_string(),
                )
            }
            ApiError::LockPoisoned => {
                tracing::error!("portal state lock poisoned");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "lock_poisoned",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<UnknownVocabulary> for ApiError {
    fn from(err: UnknownVocabulary) -> Self {
        ApiError::UnknownVocabulary(err.0)
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::LockPoisoned => ApiError::LockPoisoned,
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn unknown_vocabulary_returns_400() {
        let response = ApiError::UnknownVocabulary("rxnorm".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "unknown_vocabulary");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("rxnorm"));
    }

    #[tokio::test]
    async fn invalid_page_size_returns_400() {
        let response = ApiError::InvalidPageSize(37).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "invalid_page_size");
        assert!(json["error"]["message"].as_str().unwrap().contains("37"));
    }

    #[tokio::test]
    async fn internal_returns_500_and_hides_detail() {
        let response = ApiError::Internal("worker thread crashed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        // Internal errors hide details from client
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn export_returns_500() {
        let response = ApiError::Export("buffer".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "export_failed");
    }

    #[tokio::test]
    async fn unknown_vocabulary_converts_from_parse_error() {
        let parse_err = "rxnorm".parse::<crate::vocabulary::Vocabulary>().unwrap_err();
        let api_err: ApiError = parse_err.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn portal_error_maps_to_lock_poisoned() {
        let api_err: ApiError = PortalError::LockPoisoned.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "lock_poisoned");
    }
}
