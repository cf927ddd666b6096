//! Links employee stubs into a forest and assigns tiers.

use std::collections::{HashMap, VecDeque};

use super::{is_retained, Forest};
use crate::models::{Employee, RawEmployeeRecord};

/// Link stubs into a forest.
///
/// Manager references are joined on `company_id`: a stub reports to the stub
/// whose source record has `company_id == reporting_to`. References that do
/// not resolve leave the stub as a root. Tiers are assigned breadth-first
/// from all roots at once, roots at tier 1.
///
/// Reporting cycles are broken: the earliest stub (in source order) on a
/// cycle is detached from its manager and becomes a root.
pub fn build(stubs: Vec<Employee>, raw_records: &[RawEmployeeRecord]) -> Forest {
    let ids: Vec<String> = stubs.iter().map(|e| e.id.clone()).collect();
    let index: HashMap<String, usize> = ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.clone(), idx))
        .collect();

    // Source record of each stub, and company code -> stub.
    let mut source: Vec<Option<&RawEmployeeRecord>> = vec![None; stubs.len()];
    let mut by_company: HashMap<&str, usize> = HashMap::new();
    for record in raw_records.iter().filter(|r| is_retained(r)) {
        let Some(&idx) = index.get(&record.employee_id) else {
            continue;
        };
        if source[idx].is_some() {
            continue;
        }
        source[idx] = Some(record);
        if !record.company_id.is_empty() {
            by_company.entry(record.company_id.as_str()).or_insert(idx);
        }
    }

    tracing::info!("Built lookup maps for {} employees", by_company.len());

    let mut parents: Vec<Option<usize>> = vec![None; stubs.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); stubs.len()];
    for (idx, record) in source.iter().copied().enumerate() {
        let Some(code) = record.and_then(|r| r.manager_code()) else {
            continue;
        };
        match by_company.get(code) {
            Some(&manager) if manager == idx => {
                tracing::warn!("Employee {} reports to itself, treating as root", stubs[idx].id);
            }
            Some(&manager) => {
                parents[idx] = Some(manager);
                children[manager].push(idx);
            }
            None => {
                tracing::debug!(
                    "Manager {} of employee {} not found, treating as root",
                    code,
                    stubs[idx].id
                );
            }
        }
    }

    let mut roots: Vec<usize> = (0..stubs.len())
        .filter(|&idx| parents[idx].is_none())
        .collect();
    let mut tiers = vec![0u32; stubs.len()];
    let mut visited = vec![false; stubs.len()];
    assign_tiers(&roots, &children, &mut tiers, &mut visited);

    // Anything not reached from a root sits on or below a reporting cycle.
    while let Some(start) = visited.iter().position(|&v| !v) {
        let root = cycle_entry(start, &parents);
        tracing::warn!(
            "Reporting cycle through employee {}, detaching it as a root",
            stubs[root].id
        );
        if let Some(manager) = parents[root].take() {
            children[manager].retain(|&child| child != root);
        }
        roots.push(root);
        assign_tiers(&[root], &children, &mut tiers, &mut visited);
    }

    let employees: Vec<Employee> = stubs
        .into_iter()
        .enumerate()
        .map(|(idx, stub)| Employee {
            parent_id: parents[idx].map(|p| ids[p].clone()),
            children: children[idx].iter().map(|&c| ids[c].clone()).collect(),
            tier: tiers[idx],
            ..stub
        })
        .collect();

    let forest = Forest {
        employees,
        index,
        roots,
    };

    tracing::info!(
        "Found {} root employees: {:?}",
        forest.roots.len(),
        forest
            .roots()
            .map(|e| format!("{} ({})", e.name, e.position))
            .collect::<Vec<_>>()
    );
    for (tier, count) in forest.tier_counts() {
        tracing::info!("  Tier {}: {} employees", tier, count);
    }

    forest
}

/// Breadth-first tier assignment from the given seeds at tier 1.
fn assign_tiers(
    seeds: &[usize],
    children: &[Vec<usize>],
    tiers: &mut [u32],
    visited: &mut [bool],
) {
    let mut queue: VecDeque<(usize, u32)> = seeds.iter().map(|&idx| (idx, 1)).collect();

    while let Some((idx, tier)) = queue.pop_front() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        tiers[idx] = tier;

        for &child in &children[idx] {
            queue.push_back((child, tier + 1));
        }
    }
}

/// Walk up from an unreached node until the walk repeats, and return the
/// cycle member that comes first in source order.
fn cycle_entry(start: usize, parents: &[Option<usize>]) -> usize {
    let mut path = Vec::new();
    let mut on_path = vec![false; parents.len()];
    let mut current = start;

    loop {
        if on_path[current] {
            let from = path.iter().position(|&idx| idx == current).unwrap_or(0);
            return path[from..].iter().copied().min().unwrap_or(current);
        }
        on_path[current] = true;
        path.push(current);
        match parents[current] {
            Some(parent) => current = parent,
            // Reached a root; cannot happen for unreached nodes.
            None => return current,
        }
    }
}
