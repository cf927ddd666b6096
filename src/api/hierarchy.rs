//! Hierarchy API endpoints.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};

use super::{current_dataset, error, success, success_json, ApiResult};
use crate::errors::{AppError, AppErrorWithRevision};
use crate::models::{trees_to_json, Employee};
use crate::AppState;

/// Which subordinates to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubordinateScope {
    /// Immediate reports only.
    #[default]
    Direct,
    /// Reports at every depth.
    All,
}

impl SubordinateScope {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "direct" => Some(SubordinateScope::Direct),
            "all" => Some(SubordinateScope::All),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SubordinatesQuery {
    /// `direct` or `all`; empty means direct.
    #[serde(default)]
    pub scope: Option<String>,
}

impl SubordinatesQuery {
    pub fn scope(&self) -> Result<SubordinateScope, AppError> {
        match self.scope.as_deref().map(str::trim) {
            None | Some("") => Ok(SubordinateScope::default()),
            Some(scope) => SubordinateScope::from_str(scope)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid scope: {}", scope))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subordinates {
    pub employee_id: String,
    pub scope: SubordinateScope,
    pub ids: Vec<String>,
}

/// GET /api/hierarchy - Nested trees, one per root.
pub async fn get_hierarchy(
    State(state): State<AppState>,
) -> Result<Response, AppErrorWithRevision> {
    let dataset = current_dataset(&state).await?;

    let trees = dataset.directory.forest().tree();
    Ok(success_json(trees_to_json(&trees), dataset.revision_id))
}

/// GET /api/employees/{id}/subordinates - Subordinate ids; empty for unknown ids.
pub async fn get_subordinates(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SubordinatesQuery>,
) -> ApiResult<Subordinates> {
    let dataset = current_dataset(&state).await?;

    let scope = match params.scope() {
        Ok(scope) => scope,
        Err(e) => return error(e, dataset.revision_id),
    };

    let ids = match scope {
        SubordinateScope::Direct => dataset.directory.direct_subordinates(&id),
        SubordinateScope::All => dataset.directory.all_subordinates(&id),
    };

    success(
        Subordinates {
            employee_id: id,
            scope,
            ids: ids.into_iter().collect(),
        },
        dataset.revision_id,
    )
}

/// GET /api/employees/{id}/chain - Reporting chain from the root down.
pub async fn get_reporting_chain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Employee>> {
    let dataset = current_dataset(&state).await?;

    let chain = dataset
        .directory
        .reporting_chain(&id)
        .into_iter()
        .cloned()
        .collect();

    success(chain, dataset.revision_id)
}
