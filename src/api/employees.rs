//! Employee API endpoints.

use axum::extract::{Path, Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{current_dataset, error, success, ApiResult};
use crate::dates::{tenure_since, Tenure};
use crate::errors::AppError;
use crate::models::{Employee, RawEmployeeRecord};
use crate::search::{filter_and_sort, FilterOptions, SortKey};
use crate::AppState;

/// Filter and sort query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    /// Free-text search.
    #[serde(default)]
    pub q: Option<String>,
    /// Exact position.
    #[serde(default)]
    pub position: Option<String>,
    /// Exact tier; empty means all tiers.
    #[serde(default)]
    pub tier: Option<String>,
    /// `name` or `date`; empty keeps source order.
    #[serde(default)]
    pub sort_by: Option<String>,
}

impl EmployeeQuery {
    pub fn to_options(&self) -> Result<FilterOptions, AppError> {
        let tier_filter = match self.tier.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tier) => Some(
                tier.parse::<u32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid tier: {}", tier)))?,
            ),
        };

        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(key) => Some(
                SortKey::from_str(key)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid sortBy: {}", key)))?,
            ),
        };

        Ok(FilterOptions {
            search_query: self.q.clone().unwrap_or_default(),
            position_filter: self.position.clone().filter(|p| !p.is_empty()),
            tier_filter,
            sort_by,
        })
    }
}

/// Everything the detail card shows for one employee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub hierarchy_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawEmployeeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure: Option<Tenure>,
    pub direct_reports: usize,
    pub total_reports: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerName {
    pub manager_id: String,
    pub name: String,
}

/// GET /api/employees - Filtered and sorted employee list.
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeQuery>,
) -> ApiResult<Vec<Employee>> {
    let dataset = current_dataset(&state).await?;
    let revision_id = dataset.revision_id;

    let options = match params.to_options() {
        Ok(options) => options,
        Err(e) => return error(e, revision_id),
    };

    let directory = &dataset.directory;
    let employees = filter_and_sort(directory.employees(), directory.raw_records(), &options)
        .into_iter()
        .cloned()
        .collect();

    success(employees, revision_id)
}

/// GET /api/employees/{id} - Employee detail.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmployeeDetail> {
    let dataset = current_dataset(&state).await?;
    let revision_id = dataset.revision_id;
    let directory = &dataset.directory;

    let Some(employee) = directory.employee(&id) else {
        return error(
            AppError::NotFound(format!("Employee {} not found", id)),
            revision_id,
        );
    };

    let raw = directory.raw_record(&id).cloned();
    let today = Utc::now().date_naive();
    let tenure = raw
        .as_ref()
        .and_then(|r| tenure_since(r.date_of_joining.as_deref(), today));

    let detail = EmployeeDetail {
        employee: employee.clone(),
        hierarchy_label: employee.hierarchy_label(),
        manager_name: employee
            .parent_id
            .as_deref()
            .map(|manager_id| directory.manager_name(manager_id).to_string()),
        raw,
        tenure,
        direct_reports: employee.children.len(),
        total_reports: directory.all_subordinates(&id).len(),
    };

    success(detail, revision_id)
}

/// GET /api/managers/{id}/name - Manager name, `Unknown` when absent.
pub async fn get_manager_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ManagerName> {
    let dataset = current_dataset(&state).await?;

    let name = dataset.directory.manager_name(&id).to_string();
    success(ManagerName { manager_id: id, name }, dataset.revision_id)
}
