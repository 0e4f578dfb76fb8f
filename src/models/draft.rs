//! The in-progress evaluation being edited.

use serde::{Deserialize, Serialize};

use super::{EmployeeId, GradeSheet, Period};

/// An unsaved evaluation.
///
/// A draft is never partially persisted: it is either submitted as a whole
/// or replaced by a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDraft {
    /// The selected employee; empty when nothing is selected.
    pub employee_id: EmployeeId,
    /// Display copy of the selected employee's name.
    pub employee_name: String,
    /// The selected month (1-12).
    pub month: Option<u32>,
    /// The selected year.
    pub year: Option<i32>,
    /// Per-category grades.
    pub grades: GradeSheet,
    /// Free-text notes.
    pub notes: String,
}

impl EvaluationDraft {
    /// Creates an empty draft for the given default period.
    ///
    /// # Examples
    ///
    /// ```
    /// use plexus_evaluations::models::{EvaluationDraft, Period};
    ///
    /// let draft = EvaluationDraft::fresh(Period::new(2, 2024).unwrap());
    /// assert!(draft.employee_id.is_empty());
    /// assert_eq!(draft.month, Some(2));
    /// assert!(draft.grades.is_empty());
    /// ```
    pub fn fresh(period: Period) -> Self {
        Self {
            employee_id: EmployeeId::default(),
            employee_name: String::new(),
            month: Some(period.month),
            year: Some(period.year),
            grades: GradeSheet::default(),
            notes: String::new(),
        }
    }

    /// Returns the selected period if both month and year are set.
    pub fn period(&self) -> Option<Period> {
        Period::new(self.month?, self.year?)
    }
}
