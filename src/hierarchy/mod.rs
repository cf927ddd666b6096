//! Reporting hierarchy: raw record ingestion and forest construction.
//!
//! Nodes live in a flat arena; parent and child links are indices resolved
//! through an id index, so the forest never holds reference cycles.

mod builder;
mod ingest;

pub use builder::*;
pub use ingest::*;

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::models::{Employee, EmployeeTree};

/// A fully linked reporting forest. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    employees: Vec<Employee>,
    index: HashMap<String, usize>,
    roots: Vec<usize>,
}

impl Forest {
    /// All employees in source order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Look up an employee by `employee_id`.
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.index.get(id).map(|&idx| &self.employees[idx])
    }

    /// Root employees, in the order they were seeded for tier assignment.
    pub fn roots(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.roots.iter().map(move |&idx| &self.employees[idx])
    }

    /// Direct reports of an employee, in source order.
    pub fn children_of<'a>(
        &'a self,
        employee: &'a Employee,
    ) -> impl Iterator<Item = &'a Employee> + 'a {
        employee.children.iter().filter_map(move |id| self.get(id))
    }

    fn child_indices(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.employees[idx]
            .children
            .iter()
            .filter_map(move |id| self.index.get(id).copied())
    }

    /// Manager of an employee, if it has one.
    pub fn parent_of(&self, employee: &Employee) -> Option<&Employee> {
        employee.parent_id.as_deref().and_then(|id| self.get(id))
    }

    /// Number of employees per tier.
    pub fn tier_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for employee in &self.employees {
            *counts.entry(employee.tier).or_insert(0) += 1;
        }
        counts
    }

    /// Highest tier present, zero for an empty forest.
    pub fn max_tier(&self) -> u32 {
        self.employees.iter().map(|e| e.tier).max().unwrap_or(0)
    }

    /// Nested view of every tree, one per root.
    ///
    /// Built bottom-up without recursion, so chain depth is unbounded.
    pub fn tree(&self) -> Vec<EmployeeTree> {
        // Managers precede their reports in breadth-first order.
        let mut order = Vec::with_capacity(self.employees.len());
        let mut queue: VecDeque<usize> = self.roots.iter().copied().collect();
        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            queue.extend(self.child_indices(idx));
        }

        let mut built: Vec<Option<EmployeeTree>> =
            (0..self.employees.len()).map(|_| None).collect();
        for &idx in order.iter().rev() {
            let children = self
                .child_indices(idx)
                .filter_map(|child| built[child].take())
                .collect();
            let employee = &self.employees[idx];
            built[idx] = Some(EmployeeTree {
                id: employee.id.clone(),
                name: employee.name.clone(),
                position: employee.position.clone(),
                tier: employee.tier,
                hierarchy_label: employee.hierarchy_label(),
                parent_id: employee.parent_id.clone(),
                children,
            });
        }

        self.roots
            .iter()
            .filter_map(|&idx| built[idx].take())
            .collect()
    }
}
