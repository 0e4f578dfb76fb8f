//! Client-side draft validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EvaluationDraft;

/// A rule an incomplete draft violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    /// No employee is selected.
    MissingEmployee,
    /// No month (1-12) is selected.
    MissingMonth,
    /// No year is selected.
    MissingYear,
    /// None of the five categories has a grade.
    NoGrades,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationIssue::MissingEmployee => "Please select an employee",
            ValidationIssue::MissingMonth => "Please select a month",
            ValidationIssue::MissingYear => "Please select a year",
            ValidationIssue::NoGrades => "Please provide at least one grade",
        })
    }
}

/// Checks a draft and returns every violated rule, in display order.
///
/// An empty result means the draft may be submitted.
///
/// # Examples
///
/// ```
/// use plexus_evaluations::calculation::{validate, ValidationIssue};
/// use plexus_evaluations::models::{EvaluationDraft, Period};
///
/// let draft = EvaluationDraft::fresh(Period::new(2, 2024).unwrap());
/// assert_eq!(
///     validate(&draft),
///     vec![ValidationIssue::MissingEmployee, ValidationIssue::NoGrades]
/// );
/// ```
pub fn validate(draft: &EvaluationDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.employee_id.is_empty() {
        issues.push(ValidationIssue::MissingEmployee);
    }
    if !draft.month.is_some_and(|m| (1..=12).contains(&m)) {
        issues.push(ValidationIssue::MissingMonth);
    }
    if !draft.year.is_some_and(|y| y != 0) {
        issues.push(ValidationIssue::MissingYear);
    }
    if draft.grades.is_empty() {
        issues.push(ValidationIssue::NoGrades);
    }

    issues
}
