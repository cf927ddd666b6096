//! Statistics and facet endpoints.

use axum::extract::{Query, State};

use super::{current_dataset, error, success, ApiResult, EmployeeQuery};
use crate::query::{EmployeeStats, Facets};
use crate::search::filter_and_sort;
use crate::AppState;

/// GET /api/stats - Overview figures; filter params set the `filtered` count.
pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<EmployeeQuery>,
) -> ApiResult<EmployeeStats> {
    let dataset = current_dataset(&state).await?;
    let revision_id = dataset.revision_id;

    let options = match params.to_options() {
        Ok(options) => options,
        Err(e) => return error(e, revision_id),
    };

    let directory = &dataset.directory;
    let filtered = filter_and_sort(directory.employees(), directory.raw_records(), &options).len();

    success(directory.stats(filtered), revision_id)
}

/// GET /api/facets - Positions and tiers for the filter controls.
pub async fn get_facets(State(state): State<AppState>) -> ApiResult<Facets> {
    let dataset = current_dataset(&state).await?;

    success(dataset.directory.facets(), dataset.revision_id)
}
