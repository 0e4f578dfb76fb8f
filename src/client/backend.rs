//! The backend seam and its wire envelopes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EvalResult;
use crate::models::{Employee, EvaluationPayload, EvaluationRecord};

/// Envelope of the two list endpoints: `{ "data": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    /// The listed items. A missing `data` key reads as an empty list.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Envelope of the create endpoint: `{ "message"?, "data"? }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEnvelope {
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The created record, when the server echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// What came back from a create request that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOutcome {
    /// HTTP status code.
    pub status: u16,
    /// Message from the response body, if any.
    pub message: Option<String>,
    /// The created record, if the body carried one that could be read.
    pub record: Option<EvaluationRecord>,
}

impl CreateOutcome {
    /// Builds an outcome from a status and a raw response body.
    ///
    /// Bodies that are not the expected JSON envelope are tolerated; they
    /// simply yield no message and no record.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let envelope: CreateEnvelope = serde_json::from_slice(body).unwrap_or_default();
        let record = envelope
            .data
            .and_then(|data| serde_json::from_value(data).ok());
        Self {
            status,
            message: envelope.message.filter(|m| !m.trim().is_empty()),
            record,
        }
    }

    /// Returns true for a 2xx status.
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The REST collaborator the workflow talks to.
///
/// Read operations fail on transport errors and non-success statuses.
/// `create_evaluation` fails only when no response arrived at all; judging
/// the response is left to the caller.
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    /// Lists the employee directory.
    async fn list_employees(&self) -> EvalResult<Vec<Employee>>;

    /// Lists every stored evaluation.
    async fn list_evaluations(&self) -> EvalResult<Vec<EvaluationRecord>>;

    /// Sends a new evaluation.
    async fn create_evaluation(&self, payload: &EvaluationPayload) -> EvalResult<CreateOutcome>;
}
