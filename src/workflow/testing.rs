//! In-memory backend double for workflow tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::{CreateOutcome, EvaluationBackend};
use crate::error::{EvalError, EvalResult};
use crate::models::{Employee, EmployeeId, EvaluationPayload, EvaluationRecord};

pub fn record(employee_id: &str, month: u32, year: i32) -> EvaluationRecord {
    EvaluationRecord {
        id: None,
        employee_id: EmployeeId::new(employee_id),
        employee_name: None,
        month: Some(month),
        year: Some(year),
        grades: Default::default(),
        overall_grade: None,
        overall_gpa: None,
        notes: None,
        evaluation_date: None,
        evaluator_role: None,
        created_at: None,
    }
}

pub struct FakeBackend {
    employees: Mutex<Vec<Employee>>,
    evaluations: Mutex<Vec<EvaluationRecord>>,
    created: Mutex<Vec<EvaluationPayload>>,
    fail_reads: AtomicBool,
    fail_transport: AtomicBool,
    create_status: AtomicU16,
    create_message: Mutex<Option<String>>,
    evaluation_reads: AtomicUsize,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            employees: Mutex::new(Vec::new()),
            evaluations: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_transport: AtomicBool::new(false),
            create_status: AtomicU16::new(201),
            create_message: Mutex::new(Some("Evaluation created".to_string())),
            evaluation_reads: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_employees(self, employees: Vec<Employee>) -> Self {
        *self.employees.lock().unwrap() = employees;
        self
    }

    pub fn with_evaluations(self, evaluations: Vec<EvaluationRecord>) -> Self {
        *self.evaluations.lock().unwrap() = evaluations;
        self
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_transport(&self, fail: bool) {
        self.fail_transport.store(fail, Ordering::SeqCst);
    }

    pub fn respond_to_create(&self, status: u16, message: Option<&str>) {
        self.create_status.store(status, Ordering::SeqCst);
        *self.create_message.lock().unwrap() = message.map(str::to_string);
    }

    /// Stores a record as if another session had created it.
    pub fn insert_evaluation(&self, record: EvaluationRecord) {
        self.evaluations.lock().unwrap().push(record);
    }

    pub fn created(&self) -> Vec<EvaluationPayload> {
        self.created.lock().unwrap().clone()
    }

    pub fn evaluation_reads(&self) -> usize {
        self.evaluation_reads.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn read_failure(&self, endpoint: &str) -> Option<EvalError> {
        if self.fail_transport.load(Ordering::SeqCst) {
            return Some(EvalError::Transport {
                endpoint: endpoint.to_string(),
                message: "connection refused".to_string(),
            });
        }
        self.fail_reads
            .load(Ordering::SeqCst)
            .then(|| EvalError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: 500,
            })
    }
}

#[async_trait]
impl EvaluationBackend for FakeBackend {
    async fn list_employees(&self) -> EvalResult<Vec<Employee>> {
        self.calls.lock().unwrap().push("employees");
        if let Some(err) = self.read_failure("/employees") {
            return Err(err);
        }
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn list_evaluations(&self) -> EvalResult<Vec<EvaluationRecord>> {
        self.calls.lock().unwrap().push("evaluations");
        self.evaluation_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.read_failure("/evaluations") {
            return Err(err);
        }
        Ok(self.evaluations.lock().unwrap().clone())
    }

    async fn create_evaluation(&self, payload: &EvaluationPayload) -> EvalResult<CreateOutcome> {
        self.calls.lock().unwrap().push("create");
        if self.fail_transport.load(Ordering::SeqCst) {
            return Err(EvalError::Transport {
                endpoint: "/create".to_string(),
                message: "connection reset".to_string(),
            });
        }
        self.created.lock().unwrap().push(payload.clone());

        let status = self.create_status.load(Ordering::SeqCst);
        if (200..300).contains(&status) {
            self.evaluations
                .lock()
                .unwrap()
                .push(EvaluationRecord::from(payload.clone()));
        }
        Ok(CreateOutcome {
            status,
            message: self.create_message.lock().unwrap().clone(),
            record: None,
        })
    }
}
