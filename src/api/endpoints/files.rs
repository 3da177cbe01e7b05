//! Source file inventory endpoint.
//!
//! Reports which vocabulary files are present in the data directory so
//! an operator can see at a glance why a catalog came up degraded.

use std::fs;
use std::path::Path as FsPath;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::vocabulary::Vocabulary;

#[derive(Serialize)]
pub struct FilesResponse {
    pub data_dir: String,
    pub vocabularies: Vec<VocabularyFiles>,
}

#[derive(Serialize)]
pub struct VocabularyFiles {
    pub id: &'static str,
    pub main: FileStatus,
    pub translation: FileStatus,
}

#[derive(Serialize)]
pub struct FileStatus {
    pub file: &'static str,
    pub exists: bool,
    pub size_bytes: Option<u64>,
}

/// `GET /api/files` — presence and size of every expected source file.
pub async fn inventory(
    State(ctx): State<ApiContext>,
) -> Result<Json<FilesResponse>, ApiError> {
    let data_dir = ctx.portal.data_dir();
    let vocabularies = Vocabulary::ALL
        .iter()
        .map(|v| {
            let spec = v.join_spec();
            VocabularyFiles {
                id: v.id(),
                main: file_status(data_dir, spec.main_file),
                translation: file_status(data_dir, spec.translation_file),
            }
        })
        .collect();

    Ok(Json(FilesResponse {
        data_dir: data_dir.display().to_string(),
        vocabularies,
    }))
}

fn file_status(data_dir: &FsPath, file: &'static str) -> FileStatus {
    match fs::metadata(data_dir.join(file)) {
        Ok(meta) => FileStatus {
            file,
            exists: true,
            size_bytes: Some(meta.len()),
        },
        Err(_) => FileStatus {
            file,
            exists: false,
            size_bytes: None,
        },
    }
}
