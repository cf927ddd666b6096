//! Date handling for employee records.
//!
//! Source dates are loosely formatted; anything that does not parse is
//! treated as missing by callers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Parse a joining or birth date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Unit of a tenure measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    Year,
    Month,
    Day,
    Today,
    Future,
}

/// Time elapsed since a date, in the coarsest useful unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tenure {
    pub value: i64,
    pub unit: TenureUnit,
    pub text: String,
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Tenure between `since` and `today`. Months are 30 days, years 365.
pub fn tenure(since: NaiveDate, today: NaiveDate) -> Tenure {
    let days = (today - since).num_days();

    if days < 0 {
        return Tenure {
            value: -days,
            unit: TenureUnit::Future,
            text: "Future date".to_string(),
        };
    }
    if days == 0 {
        return Tenure {
            value: 0,
            unit: TenureUnit::Today,
            text: "Today".to_string(),
        };
    }
    if days < 30 {
        return Tenure {
            value: days,
            unit: TenureUnit::Day,
            text: format!("{} ago", plural(days, "day")),
        };
    }
    if days < 365 {
        let months = days / 30;
        return Tenure {
            value: months,
            unit: TenureUnit::Month,
            text: format!("{} ago", plural(months, "month")),
        };
    }

    let years = days / 365;
    let months = (days % 365) / 30;
    let text = if months == 0 {
        format!("{} ago", plural(years, "year"))
    } else {
        format!("{}, {} ago", plural(years, "year"), plural(months, "month"))
    };

    Tenure {
        value: years,
        unit: TenureUnit::Year,
        text,
    }
}

/// Tenure of a raw date string relative to `today`, if the date parses.
pub fn tenure_since(value: Option<&str>, today: NaiveDate) -> Option<Tenure> {
    parse_date(value).map(|since| tenure(since.date(), today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(
            parse_date(Some("2023-01-01")),
            day("2023-01-01").and_hms_opt(0, 0, 0)
        );
        assert!(parse_date(Some("2023-01-01T10:30:00Z")).is_some());
        assert!(parse_date(Some("2023-01-01T10:30:00.250")).is_some());
        assert!(parse_date(Some("2023-01-01 10:30:00")).is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date(None).is_none());
        assert!(parse_date(Some("")).is_none());
        assert!(parse_date(Some("  ")).is_none());
        assert!(parse_date(Some("not a date")).is_none());
        assert!(parse_date(Some("2023-13-45")).is_none());
    }

    #[test]
    fn test_tenure_buckets() {
        let today = day("2024-06-15");

        assert_eq!(tenure(day("2024-06-15"), today).text, "Today");
        assert_eq!(tenure(day("2024-06-14"), today).text, "1 day ago");
        assert_eq!(tenure(day("2024-06-01"), today).text, "14 days ago");
        assert_eq!(tenure(day("2024-05-01"), today).text, "1 month ago");
        assert_eq!(tenure(day("2023-07-01"), today).text, "11 months ago");
        assert_eq!(tenure(day("2023-06-10"), today).text, "1 year ago");
        assert_eq!(tenure(day("2021-01-01"), today).text, "3 years, 5 months ago");
        assert_eq!(tenure(day("2024-07-01"), today).unit, TenureUnit::Future);
    }

    #[test]
    fn test_tenure_since_invalid() {
        assert!(tenure_since(Some("yesterday"), day("2024-06-15")).is_none());
    }
}
