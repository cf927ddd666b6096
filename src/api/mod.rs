//! REST API module.
//!
//! Read-only routes exposing the loaded dataset to the rendering layer.

mod datastore;
mod employees;
mod hierarchy;
mod stats;

pub use datastore::*;
pub use employees::*;
pub use hierarchy::*;
pub use stats::*;

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppErrorWithRevision};
use crate::loader::LoadedDataset;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create a successful API response whose `data` is already encoded JSON.
pub fn success_json(data: String, revision_id: i64) -> Response {
    let body = format!(
        r#"{{"success":true,"data":{},"revisionId":{}}}"#,
        data, revision_id
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// The dataset being served, or an error envelope if none is loaded.
async fn current_dataset(state: &AppState) -> Result<Arc<LoadedDataset>, AppErrorWithRevision> {
    state
        .store
        .current()
        .await
        .map_err(|e| AppErrorWithRevision {
            error: e,
            revision_id: 0,
        })
}
