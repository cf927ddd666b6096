//! Raw record ingestion.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::models::{Employee, RawEmployeeRecord};

/// Whether a raw record may become a node in the chart.
pub fn is_retained(record: &RawEmployeeRecord) -> bool {
    record.is_active() && record.designation().is_some() && !record.employee_id.trim().is_empty()
}

/// Position of each `employee_id` in the raw list. When an id repeats, the
/// record that becomes a chart node is preferred over the first occurrence.
pub fn index_by_employee_id(records: &[RawEmployeeRecord]) -> HashMap<String, usize> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        match index.entry(record.employee_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(mut slot) => {
                if !is_retained(&records[*slot.get()]) && is_retained(record) {
                    slot.insert(idx);
                }
            }
        }
    }
    index
}

/// Turn raw records into unlinked employee stubs.
///
/// Inactive records, records without a designation and records without an
/// `employee_id` are dropped silently. Only the first record for a given
/// `employee_id` is kept. Stubs carry the raw `reporting_to` code in
/// `parent_id` and tier 0 until [`build`](super::build) links them.
pub fn ingest(records: &[RawEmployeeRecord]) -> Vec<Employee> {
    let mut seen = HashSet::new();
    let mut stubs = Vec::with_capacity(records.len());

    for record in records.iter().filter(|r| is_retained(r)) {
        if !seen.insert(record.employee_id.as_str()) {
            tracing::warn!(
                "Duplicate employee_id {}, keeping the first record",
                record.employee_id
            );
            continue;
        }

        stubs.push(Employee {
            id: record.employee_id.clone(),
            name: record.employee_name.clone(),
            position: record.designation.clone().unwrap_or_default(),
            tier: 0,
            parent_id: record.manager_code().map(str::to_string),
            children: Vec::new(),
        });
    }

    tracing::debug!(
        "Ingested {} of {} raw employee records",
        stubs.len(),
        records.len()
    );

    stubs
}
