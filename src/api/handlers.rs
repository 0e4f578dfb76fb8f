//! HTTP request handlers for the reference backend.
//!
//! Serves the three Plexus endpoints from memory, with the same envelopes
//! as the production backend.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::{CreateEnvelope, ListEnvelope};
use crate::config::EndpointConfig;
use crate::models::EvaluationRecord;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router on the default endpoint paths.
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, &EndpointConfig::default())
}

/// Creates the API router on custom endpoint paths.
pub fn create_router_with(state: AppState, endpoints: &EndpointConfig) -> Router {
    Router::new()
        .route(&endpoints.employees, get(list_employees_handler))
        .route(&endpoints.evaluations, get(list_evaluations_handler))
        .route(&endpoints.create_evaluation, post(create_evaluation_handler))
        .with_state(state)
}

/// Handler for the employee listing.
async fn list_employees_handler(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.employees().await;
    info!(count = data.len(), "Listing employees");
    Json(ListEnvelope { data })
}

/// Handler for the evaluation listing.
async fn list_evaluations_handler(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.evaluations().await;
    info!(count = data.len(), "Listing evaluations");
    Json(ListEnvelope { data })
}

/// Handler for evaluation creation.
///
/// Stores the record as sent, stamping an id and a creation time when
/// missing. Existing records for the same employee and period are not
/// checked.
async fn create_evaluation_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRecord>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create evaluation request");

    let mut record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let missing: Vec<&str> = [
        ("employeeId", record.employee_id.is_empty()),
        ("month", record.month.is_none()),
        ("year", record.year.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();
    if !missing.is_empty() {
        warn!(correlation_id = %correlation_id, missing = ?missing, "Evaluation without a readable key");
        return ApiErrorResponse::bad_request(ApiError::with_details(
            "VALIDATION_ERROR",
            "employeeId, month and year are required",
            format!("missing or unreadable: {}", missing.join(", ")),
        ))
        .into_response();
    }

    record.id.get_or_insert_with(|| Uuid::new_v4().to_string());
    record.created_at.get_or_insert_with(Utc::now);

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        month = record.month,
        year = record.year,
        "Evaluation stored"
    );

    let body = CreateEnvelope {
        message: Some("Evaluation created successfully".to_string()),
        data: serde_json::to_value(&record).ok(),
    };
    state.insert_evaluation(record).await;

    (
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
