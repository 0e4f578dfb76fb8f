//! Read caches of evaluations and employees.

use std::sync::Arc;

use tracing::{info, warn};

use crate::calculation::find_duplicate;
use crate::client::EvaluationBackend;
use crate::error::EvalResult;
use crate::models::{Employee, EmployeeId, EvaluationRecord};

/// In-memory copy of the backend's evaluations and employee directory.
///
/// Evaluations must be loaded before the first duplicate check means
/// anything; the form controller loads them before the employees for that
/// reason.
pub struct EvaluationStore {
    backend: Arc<dyn EvaluationBackend>,
    evaluations: Vec<EvaluationRecord>,
    employees: Vec<Employee>,
}

impl EvaluationStore {
    /// Creates an empty store backed by the given collaborator.
    pub fn new(backend: Arc<dyn EvaluationBackend>) -> Self {
        Self {
            backend,
            evaluations: Vec::new(),
            employees: Vec::new(),
        }
    }

    /// Returns a handle to the backend, for work scheduled off the store.
    pub fn backend(&self) -> Arc<dyn EvaluationBackend> {
        Arc::clone(&self.backend)
    }

    /// Refreshes the evaluation cache.
    ///
    /// On failure the cache is left as it was.
    pub async fn load_evaluations(&mut self) -> EvalResult<usize> {
        match self.backend.list_evaluations().await {
            Ok(records) => {
                self.replace_evaluations(records);
                Ok(self.evaluations.len())
            }
            Err(err) => {
                warn!(error = %err, cached = self.evaluations.len(), "Keeping cached evaluations");
                Err(err)
            }
        }
    }

    /// Refreshes the employee directory.
    ///
    /// On failure the directory is emptied, so no stale employee can be
    /// selected.
    pub async fn load_employees(&mut self) -> EvalResult<usize> {
        match self.backend.list_employees().await {
            Ok(employees) => {
                info!(count = employees.len(), "Employee directory loaded");
                self.employees = employees;
                Ok(self.employees.len())
            }
            Err(err) => {
                warn!(error = %err, "Employee directory unavailable");
                self.employees.clear();
                Err(err)
            }
        }
    }

    /// Installs a freshly fetched evaluation list.
    pub fn replace_evaluations(&mut self, records: Vec<EvaluationRecord>) {
        info!(count = records.len(), "Evaluation cache loaded");
        self.evaluations = records;
    }

    /// Finds the cached evaluation for an employee and period, if any.
    pub fn find_duplicate(
        &self,
        employee_id: &EmployeeId,
        month: u32,
        year: i32,
    ) -> Option<&EvaluationRecord> {
        find_duplicate(&self.evaluations, employee_id, month, year)
    }

    /// Looks up an employee in the directory.
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == *id)
    }

    /// Returns the cached evaluations.
    pub fn evaluations(&self) -> &[EvaluationRecord] {
        &self.evaluations
    }

    /// Returns the employee directory.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
