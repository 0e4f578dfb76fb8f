//! Evaluation rules.
//!
//! This module contains the pure functions behind the evaluation form:
//! overall grade aggregation, draft validation, duplicate lookup against the
//! cached evaluations and the default evaluation period.

mod duplicate;
mod overall_grade;
mod period;
mod validation;

pub use duplicate::{find_duplicate, find_duplicate_loose};
pub use overall_grade::{
    GRADE_A_THRESHOLD, GRADE_B_THRESHOLD, GRADE_C_THRESHOLD, compute_overall, grade_for_gpa,
};
pub use period::previous_month;
pub use validation::{ValidationIssue, validate};
