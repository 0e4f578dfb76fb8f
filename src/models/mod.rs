//! Core data models for the evaluation workflow.
//!
//! This module contains all the domain models used throughout the crate.

mod draft;
mod employee;
mod evaluation;
mod grade;
mod period;

pub use draft::EvaluationDraft;
pub use employee::{Employee, EmployeeId};
pub use evaluation::{EvaluationPayload, EvaluationRecord, OverallGrade, coerce_int, parse_timestamp};
pub use grade::{Category, Grade, GradeSheet};
pub use period::Period;
