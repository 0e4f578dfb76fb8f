//! reqwest-based implementation of [`EvaluationBackend`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{EvalError, EvalResult};
use crate::models::{Employee, EvaluationPayload, EvaluationRecord};

use super::backend::{CreateOutcome, EvaluationBackend, ListEnvelope};

/// Talks JSON over HTTP to the Plexus backend.
///
/// Authentication headers, if any, are expected to be added by a proxy in
/// front of the backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    config: ClientConfig,
}

impl HttpBackend {
    /// Builds a backend client from configuration.
    pub fn new(config: ClientConfig) -> EvalResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| EvalError::Transport {
                endpoint: config.base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> EvalResult<Vec<T>> {
        let url = self.config.url(endpoint);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "List request failed");
            return Err(EvalError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: ListEnvelope<Value> =
            response.json().await.map_err(|e| EvalError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;
        let items = decode_rows(endpoint, envelope.data);
        info!(endpoint, count = items.len(), "List request completed");
        Ok(items)
    }
}

/// Decodes list rows one by one; a row that cannot be read is skipped.
fn decode_rows<T: DeserializeOwned>(endpoint: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(endpoint, index, error = %e, "Skipping unreadable list row");
                None
            }
        })
        .collect()
}

fn transport(endpoint: &str, error: reqwest::Error) -> EvalError {
    warn!(endpoint, error = %error, "Request did not complete");
    EvalError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

#[async_trait]
impl EvaluationBackend for HttpBackend {
    async fn list_employees(&self) -> EvalResult<Vec<Employee>> {
        self.get_list(&self.config.endpoints.employees).await
    }

    async fn list_evaluations(&self) -> EvalResult<Vec<EvaluationRecord>> {
        self.get_list(&self.config.endpoints.evaluations).await
    }

    async fn create_evaluation(&self, payload: &EvaluationPayload) -> EvalResult<CreateOutcome> {
        let endpoint = self.config.endpoints.create_evaluation.as_str();
        let url = self.config.url(endpoint);
        debug!(%url, employee_id = %payload.employee_id, "POST");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| transport(endpoint, e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| transport(endpoint, e))?;
        let outcome = CreateOutcome::from_body(status, &body);
        info!(endpoint, status, "Create request completed");
        Ok(outcome)
    }
}
