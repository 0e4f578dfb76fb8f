//! Duplicate evaluation lookup.
//!
//! Exactly one evaluation may exist per (employee, month, year). The check
//! runs against a client-side cache and is advisory only: nothing stops
//! another session from creating the same record between the check and the
//! write.

use crate::models::{EmployeeId, EvaluationRecord, coerce_int};

/// Finds the first cached evaluation for the employee and period.
///
/// The employee id compares in its textual form, so numeric and string ids
/// match. Month and year are compared after integer coercion. Multiple
/// matches are not expected; the first one wins.
///
/// # Examples
///
/// ```
/// use plexus_evaluations::calculation::find_duplicate;
/// use plexus_evaluations::models::{EmployeeId, EvaluationRecord};
///
/// let records: Vec<EvaluationRecord> = serde_json::from_value(serde_json::json!([
///     { "employeeId": 7, "month": "2", "year": 2024 }
/// ])).unwrap();
///
/// assert!(find_duplicate(&records, &EmployeeId::new("7"), 2, 2024).is_some());
/// assert!(find_duplicate(&records, &EmployeeId::new("7"), 3, 2024).is_none());
/// ```
pub fn find_duplicate<'a>(
    evaluations: &'a [EvaluationRecord],
    employee_id: &EmployeeId,
    month: u32,
    year: i32,
) -> Option<&'a EvaluationRecord> {
    if employee_id.is_empty() {
        return None;
    }
    evaluations
        .iter()
        .find(|record| record.is_for(employee_id, month, year))
}

/// Like [`find_duplicate`], but takes month and year as loosely typed JSON
/// values (numbers or numeric strings).
///
/// Returns `None` if either value cannot be coerced to a valid period.
pub fn find_duplicate_loose<'a>(
    evaluations: &'a [EvaluationRecord],
    employee_id: &EmployeeId,
    month: &serde_json::Value,
    year: &serde_json::Value,
) -> Option<&'a EvaluationRecord> {
    let month = coerce_int(month).and_then(|m| u32::try_from(m).ok())?;
    let year = coerce_int(year).and_then(|y| i32::try_from(y).ok())?;
    find_duplicate(evaluations, employee_id, month, year)
}
