//! Error types for the evaluation workflow.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the store, the form controller and the HTTP backend
//! can run into.

use thiserror::Error;

use crate::calculation::ValidationIssue;

/// The main error type for the evaluation workflow.
///
/// All fallible operations in the crate return this error type. The workflow
/// layer additionally turns each of them into a user-visible notice.
///
/// # Example
///
/// ```
/// use plexus_evaluations::error::EvalError;
///
/// let error = EvalError::ConfigNotFound {
///     path: "/missing/plexus.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/plexus.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EvalError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The request never produced a response.
    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        /// The endpoint path that was requested.
        endpoint: String,
        /// A description of the transport failure.
        message: String,
    },

    /// A read endpoint answered with a non-success status.
    #[error("Request to {endpoint} returned HTTP {status}")]
    HttpStatus {
        /// The endpoint path that was requested.
        endpoint: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The response body was not the expected JSON envelope.
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode {
        /// The endpoint path that was requested.
        endpoint: String,
        /// A description of the decode failure.
        message: String,
    },

    /// The draft failed client-side validation.
    #[error("Evaluation is incomplete: {}", join_issues(.issues))]
    Validation {
        /// Every rule the draft violates.
        issues: Vec<ValidationIssue>,
    },

    /// An evaluation already exists for the employee and period.
    #[error("An evaluation for {employee_name} already exists for {month}/{year}")]
    DuplicateEvaluation {
        /// Display name of the employee.
        employee_name: String,
        /// The evaluation month (1-12).
        month: u32,
        /// The evaluation year.
        year: i32,
    },

    /// The backend reported that the evaluation could not be created.
    #[error("Failed to create evaluation: {message}")]
    CreateRejected {
        /// The server-provided message, or a generic one.
        message: String,
    },

    /// An edit was attempted while the form is locked by an existing record.
    #[error("Form is locked: employee '{employee_id}' already evaluated for {month}/{year}")]
    FormLocked {
        /// The selected employee.
        employee_id: String,
        /// The selected month.
        month: u32,
        /// The selected year.
        year: i32,
    },

    /// A category name did not match any of the five fixed categories.
    #[error("Unknown evaluation category: {name}")]
    UnknownCategory {
        /// The name that failed to match.
        name: String,
    },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EvalError.
pub type EvalResult<T> = Result<T, EvalError>;
