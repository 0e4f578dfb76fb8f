//! Configuration types for the evaluation client.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every key is optional;
//! missing keys take the built-in defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the response to a create request is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessPolicy {
    /// Only a 2xx status counts as success.
    #[default]
    HttpStatus,
    /// Any response that arrives counts as success, whatever its status.
    ///
    /// Matches the behaviour of the legacy web form, which misreports
    /// server-side failures as successes.
    AnyResponse,
}

/// Paths of the three REST endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Employee directory listing.
    pub employees: String,
    /// Evaluation listing.
    pub evaluations: String,
    /// Evaluation creation.
    pub create_evaluation: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            employees: "/api/plexus/employee/read".to_string(),
            evaluations: "/api/plexus/evaluations/read".to_string(),
            create_evaluation: "/api/plexus/evaluations/create".to_string(),
        }
    }
}

/// The complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Endpoint paths.
    pub endpoints: EndpointConfig,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Delay before the post-submit refresh of the evaluation cache.
    pub refresh_delay_ms: u64,
    /// Marker sent as `evaluatorRole` with every new evaluation.
    pub evaluator_role: String,
    /// How create responses are judged.
    pub success_policy: SuccessPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            endpoints: EndpointConfig::default(),
            request_timeout_ms: 10_000,
            refresh_delay_ms: 2_000,
            evaluator_role: "HR".to_string(),
            success_policy: SuccessPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Returns a default configuration pointing at another origin.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins the base URL and an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Returns the post-submit refresh delay.
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}
