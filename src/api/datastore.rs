//! Datastore API endpoints.

use axum::extract::State;

use super::{current_dataset, error, success, ApiResult};
use crate::models::{Datastore, RevisionInfo};
use crate::AppState;

/// GET /api/datastore - Get the employees and raw records.
pub async fn get_datastore(State(state): State<AppState>) -> ApiResult<Datastore> {
    let dataset = current_dataset(&state).await?;

    success(dataset.datastore(), dataset.revision_id)
}

/// GET /api/datastore/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let dataset = current_dataset(&state).await?;

    success(dataset.revision_info(), dataset.revision_id)
}

/// POST /api/datastore/reload - Re-fetch the source and rebuild the hierarchy.
pub async fn reload_datastore(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_id = state.store.revision_id().await;
    tracing::info!("Reloading employee data from {}", state.config.data_source);

    match state.store.reload().await {
        Ok(dataset) => success(dataset.revision_info(), dataset.revision_id),
        Err(e) => error(e, revision_id),
    }
}
