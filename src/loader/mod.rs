//! Employee data loading.
//!
//! A load fetches the raw JSON once, builds the forest, and only then
//! replaces the dataset being served. A failed load leaves the previous
//! dataset in place.

mod source;

pub use source::*;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{Datastore, RawEmployeeRecord, RevisionInfo};
use crate::query::Directory;

/// Parse the source document into raw records.
///
/// The document must be a JSON array. Elements that are not records are
/// skipped rather than failing the load.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawEmployeeRecord>, AppError> {
    let values: Vec<Value> = serde_json::from_slice(bytes)?;
    let total = values.len();

    let records: Vec<RawEmployeeRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed employee record #{}: {}", position, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!("Skipped {} malformed employee records", total - records.len());
    }

    Ok(records)
}

/// Fetches and processes the employee data. One instance per data source.
#[derive(Debug, Clone)]
pub struct EmployeeDataLoader {
    source: DataSource,
    client: reqwest::Client,
}

impl EmployeeDataLoader {
    pub fn new(source: DataSource, fetch_timeout: std::time::Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { source, client })
    }

    /// Fetch the raw records and build the hierarchy.
    pub async fn load(&self) -> Result<Directory, AppError> {
        let bytes = self.source.fetch(&self.client).await?;
        let raw = parse_records(&bytes)?;
        tracing::info!("Loaded {} raw employees from {}", raw.len(), self.source);

        let directory = Directory::new(raw);
        if directory.forest().is_empty() {
            tracing::warn!("No active employees with a designation in {}", self.source);
        }
        tracing::info!("Processed {} valid employees", directory.forest().len());

        Ok(directory)
    }
}

/// A successfully loaded dataset.
#[derive(Debug)]
pub struct LoadedDataset {
    pub revision_id: i64,
    pub loaded_at: DateTime<Utc>,
    pub directory: Directory,
}

impl LoadedDataset {
    pub fn revision_info(&self) -> RevisionInfo {
        RevisionInfo {
            revision_id: self.revision_id,
            loaded_at: self.loaded_at,
        }
    }

    pub fn datastore(&self) -> Datastore {
        Datastore {
            revision_id: self.revision_id,
            loaded_at: self.loaded_at,
            employees: self.directory.employees().to_vec(),
            raw_employees: self.directory.raw_records().to_vec(),
        }
    }
}

/// Holds the dataset currently being served.
pub struct DatasetStore {
    loader: EmployeeDataLoader,
    current: RwLock<Option<Arc<LoadedDataset>>>,
}

impl DatasetStore {
    pub fn new(loader: EmployeeDataLoader) -> Self {
        Self {
            loader,
            current: RwLock::new(None),
        }
    }

    /// Load from the source and swap the result in. On failure the previous
    /// dataset, if any, stays current.
    pub async fn reload(&self) -> Result<Arc<LoadedDataset>, AppError> {
        let directory = self.loader.load().await?;

        let mut current = self.current.write().await;
        let revision_id = current.as_ref().map_or(0, |d| d.revision_id) + 1;
        let dataset = Arc::new(LoadedDataset {
            revision_id,
            loaded_at: Utc::now(),
            directory,
        });
        *current = Some(dataset.clone());

        tracing::info!("Dataset revision {} installed", revision_id);
        Ok(dataset)
    }

    /// The dataset being served.
    pub async fn current(&self) -> Result<Arc<LoadedDataset>, AppError> {
        self.current
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::Unavailable("Employee data has not been loaded".to_string()))
    }

    /// Revision of the dataset being served, 0 before the first load.
    pub async fn revision_id(&self) -> i64 {
        self.current
            .read()
            .await
            .as_ref()
            .map_or(0, |d| d.revision_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    const EMPLOYEES: &str = r#"[
        {"employee_id": "E1", "company_id": "C1", "employee_name": "Anita", "designation": "CEO",
         "employment_status": "Active", "reporting_to": null},
        {"employee_id": "E2", "company_id": "C2", "employee_name": "Bala", "designation": "VP",
         "employment_status": "Active", "reporting_to": "C1"},
        {"employee_id": "E3", "company_id": "C3", "employee_name": "Chitra", "designation": "VP",
         "employment_status": "Terminated", "reporting_to": "C1"},
        "not a record"
    ]"#;

    fn store_for(dir: &TempDir, contents: &str) -> DatasetStore {
        let path = dir.path().join("employees.json");
        std::fs::write(&path, contents).unwrap();
        let loader =
            EmployeeDataLoader::new(DataSource::File(path), Duration::from_secs(5)).unwrap();
        DatasetStore::new(loader)
    }

    #[test]
    fn test_parse_records_skips_malformed() {
        let records = parse_records(EMPLOYEES.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_parse_records_requires_array() {
        let err = parse_records(br#"{"employee_id": "E1"}"#).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_builds_forest() {
        let dir = TempDir::new().unwrap();
        let store = store_for(&dir, EMPLOYEES);

        let dataset = store.reload().await.unwrap();

        assert_eq!(dataset.revision_id, 1);
        assert_eq!(dataset.directory.employees().len(), 2);
        assert_eq!(dataset.directory.raw_records().len(), 3);
        assert_eq!(dataset.directory.employee("E2").unwrap().tier, 2);
    }

    #[tokio::test]
    async fn test_unavailable_before_first_load() {
        let dir = TempDir::new().unwrap();
        let store = store_for(&dir, EMPLOYEES);

        assert!(matches!(store.current().await, Err(AppError::Unavailable(_))));
        assert_eq!(store.revision_id().await, 0);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_dataset() {
        let dir = TempDir::new().unwrap();
        let store = store_for(&dir, EMPLOYEES);
        store.reload().await.unwrap();

        std::fs::write(dir.path().join("employees.json"), "garbage").unwrap();
        let err = store.reload().await.unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
        let current = store.current().await.unwrap();
        assert_eq!(current.revision_id, 1);
        assert_eq!(current.directory.employees().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = TempDir::new().unwrap();
        let loader = EmployeeDataLoader::new(
            DataSource::File(dir.path().join("nope.json")),
            Duration::from_secs(5),
        )
        .unwrap();

        assert!(matches!(loader.load().await, Err(AppError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_reload_increments_revision() {
        let dir = TempDir::new().unwrap();
        let store = store_for(&dir, EMPLOYEES);

        store.reload().await.unwrap();
        let second = store.reload().await.unwrap();

        assert_eq!(second.revision_id, 2);
        assert_eq!(store.revision_id().await, 2);
    }
}
