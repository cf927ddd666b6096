//! Aggregate statistics and filter facets.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Directory;
use crate::models::hierarchy_label;

/// Organization overview figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total: usize,
    pub filtered: usize,
    /// Employees without a resolvable manager.
    pub roots: usize,
    /// Employees with at least one direct report.
    pub managers: usize,
    /// Deepest tier present.
    pub tiers: u32,
    /// Mean salary over charted employees that have one, rounded.
    pub avg_salary: i64,
    pub largest_team: usize,
    pub by_tier: BTreeMap<u32, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFacet {
    pub position: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierFacet {
    pub tier: u32,
    pub label: String,
    pub count: usize,
}

/// Distinct values available to the position and tier filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub positions: Vec<PositionFacet>,
    pub tiers: Vec<TierFacet>,
}

impl Directory {
    /// Overview statistics; `filtered` is the size of the current filtered view.
    pub fn stats(&self, filtered: usize) -> EmployeeStats {
        let employees = self.employees();

        let managers = employees.iter().filter(|e| !e.children.is_empty()).count();
        let largest_team = employees.iter().map(|e| e.children.len()).max().unwrap_or(0);

        let salaries: Vec<f64> = employees
            .iter()
            .filter_map(|e| self.raw_record(&e.id))
            .filter_map(|r| r.salary_package)
            .filter(|s| *s > 0.0)
            .collect();
        let avg_salary = if salaries.is_empty() {
            0
        } else {
            (salaries.iter().sum::<f64>() / salaries.len() as f64).round() as i64
        };

        EmployeeStats {
            total: employees.len(),
            filtered,
            roots: employees.iter().filter(|e| e.is_root()).count(),
            managers,
            tiers: self.forest().max_tier(),
            avg_salary,
            largest_team,
            by_tier: self.forest().tier_counts(),
        }
    }

    /// Positions sorted ascending with head counts, and tiers ascending.
    pub fn facets(&self) -> Facets {
        let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
        for employee in self.employees() {
            *positions.entry(employee.position.as_str()).or_insert(0) += 1;
        }

        Facets {
            positions: positions
                .into_iter()
                .map(|(position, count)| PositionFacet {
                    position: position.to_string(),
                    count,
                })
                .collect(),
            tiers: self
                .forest()
                .tier_counts()
                .into_iter()
                .map(|(tier, count)| TierFacet {
                    tier,
                    label: hierarchy_label(tier),
                    count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawEmployeeRecord;

    fn record(
        employee_id: &str,
        position: &str,
        reporting_to: Option<&str>,
        salary: Option<f64>,
    ) -> RawEmployeeRecord {
        RawEmployeeRecord {
            employee_id: employee_id.to_string(),
            company_id: format!("C{}", employee_id),
            employee_name: employee_id.to_string(),
            designation: Some(position.to_string()),
            employment_status: "Active".to_string(),
            salary_package: salary,
            reporting_to: reporting_to.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> Directory {
        let mut gone = record("X", "Engineer", None, Some(9_000_000.0));
        gone.employment_status = "Terminated".to_string();

        Directory::new(vec![
            record("1", "Director", None, Some(300.0)),
            record("2", "Manager", Some("C1"), Some(200.0)),
            record("3", "Engineer", Some("C2"), Some(100.0)),
            record("4", "Engineer", Some("C2"), None),
            record("5", "Engineer", Some("C2"), Some(0.0)),
            gone,
        ])
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats(2);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.filtered, 2);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.managers, 2);
        assert_eq!(stats.tiers, 3);
        assert_eq!(stats.largest_team, 3);
        assert_eq!(stats.avg_salary, 200);
        assert_eq!(stats.by_tier.get(&3), Some(&3));
    }

    #[test]
    fn test_stats_empty() {
        let stats = Directory::new(Vec::new()).stats(0);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.tiers, 0);
        assert_eq!(stats.avg_salary, 0);
        assert_eq!(stats.largest_team, 0);
    }

    #[test]
    fn test_facets() {
        let facets = sample().facets();

        let positions: Vec<(&str, usize)> = facets
            .positions
            .iter()
            .map(|p| (p.position.as_str(), p.count))
            .collect();
        assert_eq!(positions, vec![("Director", 1), ("Engineer", 3), ("Manager", 1)]);

        let tiers: Vec<u32> = facets.tiers.iter().map(|t| t.tier).collect();
        assert_eq!(tiers, vec![1, 2, 3]);
        assert_eq!(facets.tiers[1].label, "Executive");
    }
}
