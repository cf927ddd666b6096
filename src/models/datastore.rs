//! Datastore envelopes handed to the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Employee, RawEmployeeRecord};

/// The full loaded dataset: the forest flattened to a list plus the raw records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastore {
    pub revision_id: i64,
    pub loaded_at: DateTime<Utc>,
    pub employees: Vec<Employee>,
    pub raw_employees: Vec<RawEmployeeRecord>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub loaded_at: DateTime<Utc>,
}
