//! Employee filtering and sorting.
//!
//! Pure functions over the loaded employees; callers re-run them on every
//! change of search text or filters.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::hierarchy::index_by_employee_id;
use crate::models::{hierarchy_label, Employee, RawEmployeeRecord};

/// Sort order for the employee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by name, case-insensitive.
    Name,
    /// Most recent joining date first; missing or invalid dates lead.
    Date,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortKey::Name),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }
}

/// User-supplied predicates and ordering. Defaults match everything and keep
/// source order.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Case-insensitive substring; blank means no search.
    pub search_query: String,
    /// Exact position match.
    pub position_filter: Option<String>,
    /// Exact tier match.
    pub tier_filter: Option<u32>,
    pub sort_by: Option<SortKey>,
}

/// Filter employees by every active predicate, then sort the survivors.
///
/// Sorting is stable: ties keep their relative input order.
pub fn filter_and_sort<'a>(
    employees: &'a [Employee],
    raw_records: &[RawEmployeeRecord],
    options: &FilterOptions,
) -> Vec<&'a Employee> {
    let raw_index = index_by_employee_id(raw_records);
    let raw_of = |employee: &Employee| raw_index.get(&employee.id).map(|&idx| &raw_records[idx]);

    let query = options.search_query.trim().to_lowercase();
    let position = options.position_filter.as_deref().filter(|p| !p.is_empty());

    let mut filtered: Vec<&Employee> = employees
        .iter()
        .filter(|e| position.map_or(true, |p| e.position == p))
        .filter(|e| options.tier_filter.map_or(true, |t| e.tier == t))
        .filter(|e| query.is_empty() || matches_query(e, raw_of(*e), &query))
        .collect();

    match options.sort_by {
        Some(SortKey::Name) => {
            filtered.sort_by_cached_key(|e| (e.name.to_lowercase(), e.name.clone()));
        }
        Some(SortKey::Date) => {
            filtered.sort_by_cached_key(|e| {
                raw_of(*e)
                    .and_then(|r| parse_date(r.date_of_joining.as_deref()))
                    .map(Reverse)
            });
        }
        None => {}
    }

    filtered
}

/// `query` must already be trimmed and lower-cased.
fn matches_query(employee: &Employee, raw: Option<&RawEmployeeRecord>, query: &str) -> bool {
    let company_id = raw.map(|r| r.company_id.as_str()).unwrap_or_default();
    let phone = raw.and_then(|r| r.phone.as_deref()).unwrap_or_default();
    let label = hierarchy_label(employee.tier);

    [
        employee.name.as_str(),
        employee.position.as_str(),
        employee.id.as_str(),
        company_id,
        phone,
        label.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Directory;

    fn record(
        employee_id: &str,
        name: &str,
        position: &str,
        reporting_to: Option<&str>,
        joined: Option<&str>,
    ) -> RawEmployeeRecord {
        RawEmployeeRecord {
            employee_id: employee_id.to_string(),
            company_id: format!("ACME-{}", employee_id),
            employee_name: name.to_string(),
            designation: Some(position.to_string()),
            employment_status: "Active".to_string(),
            phone: Some(format!("98861{}", employee_id.trim_start_matches('E'))),
            date_of_joining: joined.map(str::to_string),
            reporting_to: reporting_to.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> Directory {
        Directory::new(vec![
            record("E1", "zara Khan", "CEO", None, Some("2015-03-01")),
            record("E2", "Asha Rao", "Engineer", Some("ACME-E1"), Some("2023-01-01")),
            record("E3", "Bharat", "Engineer", Some("ACME-E2"), None),
            record("E4", "chetan", "Designer", Some("ACME-E2"), Some("someday")),
            record("E5", "Deepa", "Engineer", Some("ACME-E1"), Some("2020-07-15")),
        ])
    }

    fn run(directory: &Directory, options: FilterOptions) -> Vec<String> {
        filter_and_sort(directory.employees(), directory.raw_records(), &options)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    }

    #[test]
    fn test_no_filters_keeps_everything_in_order() {
        let directory = sample();
        assert_eq!(run(&directory, FilterOptions::default()), vec!["E1", "E2", "E3", "E4", "E5"]);
    }

    #[test]
    fn test_search_matches_name_case_insensitive() {
        let directory = sample();

        let options = FilterOptions {
            search_query: "  ASHA ".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&directory, options), vec!["E2"]);

        let options = FilterOptions {
            search_query: "zzz".to_string(),
            ..Default::default()
        };
        assert!(run(&directory, options).is_empty());
    }

    #[test]
    fn test_search_matches_raw_fields_and_label() {
        let directory = sample();

        let by_company = FilterOptions {
            search_query: "acme-e4".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&directory, by_company), vec!["E4"]);

        let by_phone = FilterOptions {
            search_query: "988615".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&directory, by_phone), vec!["E5"]);

        // E1 is tier 1.
        let by_label = FilterOptions {
            search_query: "board of".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&directory, by_label), vec!["E1"]);
    }

    #[test]
    fn test_blank_search_is_no_op() {
        let directory = sample();
        let options = FilterOptions {
            search_query: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&directory, options).len(), 5);
    }

    #[test]
    fn test_position_filter_exact() {
        let directory = sample();

        let options = FilterOptions {
            position_filter: Some("Engineer".to_string()),
            ..Default::default()
        };
        assert_eq!(run(&directory, options), vec!["E2", "E3", "E5"]);

        let options = FilterOptions {
            position_filter: Some("engineer".to_string()),
            ..Default::default()
        };
        assert!(run(&directory, options).is_empty());

        let options = FilterOptions {
            position_filter: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(run(&directory, options).len(), 5);
    }

    #[test]
    fn test_tier_filter_exact() {
        let directory = sample();

        let options = FilterOptions {
            tier_filter: Some(2),
            ..Default::default()
        };
        assert_eq!(run(&directory, options), vec!["E2", "E5"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let directory = sample();

        let options = FilterOptions {
            search_query: "a".to_string(),
            position_filter: Some("Engineer".to_string()),
            tier_filter: Some(3),
            sort_by: None,
        };
        let result = filter_and_sort(directory.employees(), directory.raw_records(), &options);

        assert_eq!(result.len(), 1);
        for employee in result {
            assert_eq!(employee.position, "Engineer");
            assert_eq!(employee.tier, 3);
            assert!(employee.name.to_lowercase().contains('a'));
        }
    }

    #[test]
    fn test_sort_by_name() {
        let directory = sample();
        let options = FilterOptions {
            sort_by: Some(SortKey::Name),
            ..Default::default()
        };
        assert_eq!(run(&directory, options), vec!["E2", "E3", "E4", "E5", "E1"]);
    }

    #[test]
    fn test_sort_by_date_missing_first() {
        let directory = sample();
        let options = FilterOptions {
            sort_by: Some(SortKey::Date),
            ..Default::default()
        };
        // E3 has no date, E4 an unparseable one: both lead in input order.
        assert_eq!(run(&directory, options), vec!["E3", "E4", "E2", "E5", "E1"]);
    }

    #[test]
    fn test_date_sort_is_stable_for_missing_dates() {
        let directory = Directory::new(vec![
            record("A", "A", "Staff", None, None),
            record("B", "B", "Staff", None, Some("2023-01-01")),
            record("C", "C", "Staff", None, None),
        ]);
        let options = FilterOptions {
            sort_by: Some(SortKey::Date),
            ..Default::default()
        };

        let first = run(&directory, options.clone());
        assert_eq!(first, vec!["A", "C", "B"]);
        for _ in 0..5 {
            assert_eq!(run(&directory, options.clone()), first);
        }
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(SortKey::from_str("date"), Some(SortKey::Date));
        assert_eq!(SortKey::from_str("salary"), None);
    }
}
