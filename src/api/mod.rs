//! Reference Plexus backend.
//!
//! An in-memory axum server exposing the employee listing, the evaluation
//! listing and evaluation creation with the production envelopes. Useful
//! for local development and for exercising [`crate::client::HttpBackend`]
//! end to end.

mod handlers;
mod response;
mod state;

pub use handlers::{create_router, create_router_with};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
