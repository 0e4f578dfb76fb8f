//! Monthly employee performance evaluations for the Plexus backend.
//!
//! This crate implements the evaluation submission workflow: a cache of
//! existing evaluations and employees, a form controller that aggregates
//! category grades into an overall grade, guards against filing a second
//! evaluation for the same employee and month, and submits new evaluations
//! over REST.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod workflow;
