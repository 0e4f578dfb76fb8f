//! Application state for the reference backend.
//!
//! Holds the employee directory and the stored evaluations in memory,
//! shared by all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Employee, EvaluationRecord};

#[derive(Debug, Default)]
struct Records {
    employees: Vec<Employee>,
    evaluations: Vec<EvaluationRecord>,
}

/// Shared application state.
///
/// Uniqueness of (employee, month, year) is deliberately not enforced here;
/// the server accepts whatever it is sent, like the production backend.
#[derive(Clone, Default)]
pub struct AppState {
    records: Arc<RwLock<Records>>,
}

impl AppState {
    /// Creates a state seeded with employees and evaluations.
    pub fn new(employees: Vec<Employee>, evaluations: Vec<EvaluationRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Records {
                employees,
                evaluations,
            })),
        }
    }

    /// Returns a snapshot of the employee directory.
    pub async fn employees(&self) -> Vec<Employee> {
        self.records.read().await.employees.clone()
    }

    /// Returns a snapshot of the stored evaluations.
    pub async fn evaluations(&self) -> Vec<EvaluationRecord> {
        self.records.read().await.evaluations.clone()
    }

    /// Appends an evaluation.
    pub async fn insert_evaluation(&self, record: EvaluationRecord) {
        self.records.write().await.evaluations.push(record);
    }
}
