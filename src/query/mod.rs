//! Read-only queries over a loaded dataset.

mod stats;

pub use stats::*;

use std::collections::{BTreeSet, HashMap};

use crate::hierarchy::{build, index_by_employee_id, ingest, Forest};
use crate::models::{Employee, RawEmployeeRecord};

/// Returned by [`Directory::manager_name`] for unknown ids.
pub const UNKNOWN_MANAGER: &str = "Unknown";

/// The built forest together with the raw records it came from.
///
/// Both are immutable once constructed; a reload builds a new `Directory`.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    forest: Forest,
    raw: Vec<RawEmployeeRecord>,
    raw_index: HashMap<String, usize>,
}

impl Directory {
    /// Ingest and link raw records.
    pub fn new(raw: Vec<RawEmployeeRecord>) -> Self {
        let forest = build(ingest(&raw), &raw);
        let raw_index = index_by_employee_id(&raw);

        Self {
            forest,
            raw,
            raw_index,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Employees in source order.
    pub fn employees(&self) -> &[Employee] {
        self.forest.employees()
    }

    pub fn raw_records(&self) -> &[RawEmployeeRecord] {
        &self.raw
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.forest.get(employee_id)
    }

    /// Raw record by `employee_id` (not `company_id`).
    pub fn raw_record(&self, employee_id: &str) -> Option<&RawEmployeeRecord> {
        self.raw_index.get(employee_id).map(|&idx| &self.raw[idx])
    }

    /// Name of the employee with this id, or [`UNKNOWN_MANAGER`].
    pub fn manager_name(&self, manager_id: &str) -> &str {
        self.forest
            .get(manager_id)
            .map(|e| e.name.as_str())
            .unwrap_or(UNKNOWN_MANAGER)
    }

    /// Ids of immediate reports only.
    pub fn direct_subordinates(&self, employee_id: &str) -> BTreeSet<String> {
        self.forest
            .get(employee_id)
            .map(|e| e.children.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Ids of every report at any depth.
    pub fn all_subordinates(&self, employee_id: &str) -> BTreeSet<String> {
        let mut subordinates = BTreeSet::new();
        let mut stack: Vec<&Employee> = self.forest.get(employee_id).into_iter().collect();
        while let Some(employee) = stack.pop() {
            for child in self.forest.children_of(employee) {
                if subordinates.insert(child.id.clone()) {
                    stack.push(child);
                }
            }
        }
        subordinates
    }

    /// Management chain from the root down to the employee, inclusive.
    /// Empty for unknown ids.
    pub fn reporting_chain(&self, employee_id: &str) -> Vec<&Employee> {
        let mut chain = Vec::new();
        let mut current = self.forest.get(employee_id);
        while let Some(employee) = current {
            chain.push(employee);
            current = self.forest.parent_of(employee);
        }
        chain.reverse();
        chain
    }
}
