//! Evaluation record and create-payload models.
//!
//! [`EvaluationRecord`] is what the list endpoint returns; it is decoded
//! leniently because records written by older clients carry numbers as
//! strings, date-only timestamps and populated employee references. A field
//! that cannot be read decodes as absent rather than failing the record. [`EvaluationPayload`] is what this crate sends to the create
//! endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{EmployeeId, Grade, GradeSheet};

/// The overall grade derived from a draft's category grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallGrade {
    /// The letter the GPA maps to.
    pub grade: Grade,
    /// Mean grade points, rounded to two decimal places.
    pub gpa: Decimal,
}

/// A persisted evaluation as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    /// Backend identifier of the record, if any.
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// The evaluated employee; empty if the stored value is unreadable.
    #[serde(default, deserialize_with = "lenient_employee_id")]
    pub employee_id: EmployeeId,
    /// Denormalized display name at the time of evaluation.
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: Option<String>,
    /// The evaluation month; `None` if the stored value is not numeric.
    #[serde(default, deserialize_with = "lenient_month")]
    pub month: Option<u32>,
    /// The evaluation year; `None` if the stored value is not numeric.
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    /// Per-category grades.
    #[serde(default, deserialize_with = "lenient_grades")]
    pub grades: GradeSheet,
    /// The stored overall letter.
    #[serde(default, deserialize_with = "lenient_grade")]
    pub overall_grade: Option<Grade>,
    /// The stored overall GPA.
    #[serde(
        rename = "overallGPA",
        alias = "overallGpa",
        default,
        deserialize_with = "lenient_float"
    )]
    pub overall_gpa: Option<f64>,
    /// Free-text notes.
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
    /// When the evaluation was filed.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub evaluation_date: Option<DateTime<Utc>>,
    /// Marker identifying who filed the evaluation.
    #[serde(default, deserialize_with = "lenient_string")]
    pub evaluator_role: Option<String>,
    /// When the record was created.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl EvaluationRecord {
    /// Returns true if this record belongs to the given employee and period.
    ///
    /// Records whose employee, month or year could not be read never match.
    pub fn is_for(&self, employee_id: &EmployeeId, month: u32, year: i32) -> bool {
        !self.employee_id.is_empty()
            && self.employee_id == *employee_id
            && self.month == Some(month)
            && self.year == Some(year)
    }
}

/// Body of the create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    /// The evaluated employee.
    pub employee_id: EmployeeId,
    /// Display name of the employee.
    pub employee_name: String,
    /// The evaluation month (1-12).
    pub month: u32,
    /// The evaluation year.
    pub year: i32,
    /// Per-category grades.
    pub grades: GradeSheet,
    /// Free-text notes.
    pub notes: String,
    /// The derived overall letter.
    pub overall_grade: Grade,
    /// The derived GPA, sent as a JSON float.
    #[serde(rename = "overallGPA", with = "rust_decimal::serde::float")]
    pub overall_gpa: Decimal,
    /// When the evaluation was filed.
    pub evaluation_date: DateTime<Utc>,
    /// Marker identifying who filed the evaluation.
    pub evaluator_role: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl From<EvaluationPayload> for EvaluationRecord {
    fn from(payload: EvaluationPayload) -> Self {
        use rust_decimal::prelude::ToPrimitive;

        Self {
            id: None,
            employee_id: payload.employee_id,
            employee_name: Some(payload.employee_name),
            month: Some(payload.month),
            year: Some(payload.year),
            grades: payload.grades,
            overall_grade: Some(payload.overall_grade),
            overall_gpa: payload.overall_gpa.to_f64(),
            notes: Some(payload.notes),
            evaluation_date: Some(payload.evaluation_date),
            evaluator_role: Some(payload.evaluator_role),
            created_at: Some(payload.created_at),
        }
    }
}

/// Integer-coerces a JSON value.
///
/// Numbers are truncated; strings are read up to the first non-digit after
/// an optional sign, so `"02"` and `"3rd"` give 2 and 3. Anything else is
/// `None`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            let (negative, digits) = match s.as_bytes().first() {
                Some(b'-') => (true, &s[1..]),
                Some(b'+') => (false, &s[1..]),
                _ => (false, s),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            let parsed: i64 = digits[..end].parse().ok()?;
            Some(if negative { -parsed } else { parsed })
        }
        _ => None,
    }
}

fn lenient_month<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_int(&value).and_then(|n| u32::try_from(n).ok()))
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_int(&value).and_then(|n| i32::try_from(n).ok()))
}

fn lenient_grade<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Grade>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Grade::parse))
}

/// Reads a timestamp in any of the forms stored records carry.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC)
/// and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

fn lenient_employee_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EmployeeId, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(EmployeeId::from_value(&value).unwrap_or_default())
}

fn lenient_grades<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GradeSheet, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => parse_timestamp(&s),
        // Epoch milliseconds.
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
