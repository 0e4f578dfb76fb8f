//! REST client for the Plexus backend.
//!
//! [`EvaluationBackend`] is the seam the workflow depends on; [`HttpBackend`]
//! implements it with `reqwest` against the three JSON endpoints.

mod backend;
mod http;

pub use backend::{CreateEnvelope, CreateOutcome, EvaluationBackend, ListEnvelope};
pub use http::HttpBackend;
