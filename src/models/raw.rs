//! Raw employee record as delivered by the data source.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Employment status that keeps a record in the chart.
pub const ACTIVE_STATUS: &str = "Active";

/// A flat employee record exactly as found in the source file.
///
/// `reporting_to` holds the manager's `company_id`, never an `employee_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmployeeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_number")]
    pub salary_package: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employment_status: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub company_email_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub personal_email_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub date_of_joining: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub reporting_to: Option<String>,
    /// Personal and financial fields with no structural role.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawEmployeeRecord {
    pub fn is_active(&self) -> bool {
        self.employment_status == ACTIVE_STATUS
    }

    /// Designation, unless it is missing or whitespace-only.
    pub fn designation(&self) -> Option<&str> {
        self.designation
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    /// Manager reference, ignoring blank values. Never trimmed: the join on
    /// `company_id` is exact.
    pub fn manager_code(&self) -> Option<&str> {
        self.reporting_to
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }
}

/// Scalars rendered as strings; null and missing become empty.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value))
}

fn lenient_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}
