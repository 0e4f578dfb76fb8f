//! The evaluation form controller.
//!
//! Owns the draft and routes every mutation through validation and the
//! duplicate guard. States:
//!
//! ```text
//! Editing ──submit──▶ (request in flight) ──ok──▶ Editing (fresh draft)
//!    ▲  │                                  └─err─▶ Editing (draft kept)
//!    │  └─ duplicate found for (employee, month, year) ─▶ Locked
//!    └──────── employee/period changed, no duplicate ◀──────┘
//! ```
//!
//! While Locked, grades, notes and submit are refused; employee and period
//! stay editable so the user can move off the conflicting period.

use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::calculation::{ValidationIssue, compute_overall, previous_month, validate};
use crate::client::CreateOutcome;
use crate::config::{ClientConfig, SuccessPolicy};
use crate::error::{EvalError, EvalResult};
use crate::models::{
    Category, Employee, EmployeeId, EvaluationDraft, EvaluationPayload, EvaluationRecord, Grade,
    OverallGrade, Period,
};

use super::clock::{Clock, SystemClock};
use super::notify::{Notice, Notifier, TracingNotifier};
use super::store::EvaluationStore;

/// Editing mode of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// All inputs are enabled.
    Editing,
    /// An evaluation already exists for the selected employee and period.
    Locked,
}

/// Which half of the period [`EvaluationFormController::set_period`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodField {
    /// The month (1-12).
    Month,
    /// The year.
    Year,
}

/// A successfully submitted evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// What was sent.
    pub payload: EvaluationPayload,
    /// What the backend answered.
    pub outcome: CreateOutcome,
}

type RefreshResult = EvalResult<Vec<EvaluationRecord>>;

struct PendingRefresh {
    task: JoinHandle<()>,
    result: oneshot::Receiver<RefreshResult>,
}

/// Drives one evaluation form.
pub struct EvaluationFormController {
    store: EvaluationStore,
    config: ClientConfig,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    draft: EvaluationDraft,
    existing: Option<EvaluationRecord>,
    pending_refresh: Option<PendingRefresh>,
}

impl EvaluationFormController {
    /// Creates a controller with a fresh draft, logging notices via `tracing`.
    pub fn new(store: EvaluationStore, config: ClientConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            draft: EvaluationDraft::fresh(previous_month(clock.today())),
            store,
            config,
            notifier: Arc::new(TracingNotifier),
            clock,
            existing: None,
            pending_refresh: None,
        }
    }

    /// Replaces the notice sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the clock and starts over with a draft for its date.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self.reset();
        self
    }

    /// Populates the store: evaluations first, then employees.
    ///
    /// The order matters: selecting an employee runs a duplicate check, which
    /// is only meaningful once the evaluations are cached. Failures are
    /// reported as notices and never abort the load.
    pub async fn initialize(&mut self) {
        if let Err(err) = self.store.load_evaluations().await {
            self.notify(Notice::warning(format!(
                "Could not load existing evaluations, duplicate checks are unavailable: {err}"
            )));
        }
        if let Err(err) = self.store.load_employees().await {
            self.notify(Notice::error(format!("Failed to load employees: {err}")));
        }
    }

    /// Selects the employee to evaluate. An empty id clears the selection.
    ///
    /// Selection always succeeds; if the employee already has an evaluation
    /// for the draft's period, the form becomes Locked and a warning is
    /// raised.
    pub fn select_employee(&mut self, id: impl Into<EmployeeId>) {
        self.absorb_refresh();
        let id = id.into();

        if id.is_empty() {
            self.draft.employee_id = EmployeeId::default();
            self.draft.employee_name.clear();
            self.existing = None;
            return;
        }

        self.draft.employee_name = self.resolve_name(&id);
        self.draft.employee_id = id;
        self.check_existing();
    }

    /// Changes the month or year of the draft.
    ///
    /// Zero is ignored, as is a month outside 1-12. Otherwise the duplicate
    /// check re-runs for the selected employee.
    pub fn set_period(&mut self, field: PeriodField, value: u32) {
        self.absorb_refresh();
        if value == 0 {
            return;
        }

        match field {
            PeriodField::Month if (1..=12).contains(&value) => self.draft.month = Some(value),
            PeriodField::Month => {
                warn!(month = value, "Ignoring out-of-range month");
                return;
            }
            PeriodField::Year => match i32::try_from(value) {
                Ok(year) => self.draft.year = Some(year),
                Err(_) => {
                    warn!(year = value, "Ignoring out-of-range year");
                    return;
                }
            },
        }
        self.check_existing();
    }

    /// Grades one category, or clears it with `None`.
    pub fn set_grade(&mut self, category: Category, grade: Option<Grade>) -> EvalResult<()> {
        self.ensure_unlocked()?;
        self.draft.grades.set(category, grade);
        Ok(())
    }

    /// Replaces the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> EvalResult<()> {
        self.ensure_unlocked()?;
        self.draft.notes = notes.into();
        Ok(())
    }

    /// Derives the overall grade from the draft as it stands.
    pub fn overall(&self) -> Option<OverallGrade> {
        compute_overall(&self.draft.grades)
    }

    /// Returns every rule the draft currently violates.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate(&self.draft)
    }

    /// Submits the draft.
    ///
    /// Nothing is sent if the draft is invalid or if the duplicate guard,
    /// re-run here in case another session created the record meanwhile,
    /// finds an existing evaluation. On success the draft is replaced by a
    /// fresh one and a background refresh of the evaluation cache is
    /// scheduled. On failure the draft is kept for correction.
    ///
    /// The duplicate guard is advisory: true uniqueness needs a constraint
    /// on the server.
    pub async fn submit(&mut self) -> EvalResult<SubmissionReceipt> {
        self.absorb_refresh();

        let issues = self.validate();
        if !issues.is_empty() {
            for issue in &issues {
                self.notify(Notice::error(issue.to_string()));
            }
            return Err(EvalError::Validation { issues });
        }

        let employee_id = self.draft.employee_id.clone();
        let employee_name = self.resolve_name(&employee_id);
        self.draft.employee_name = employee_name.clone();

        let Some(period) = self.draft.period() else {
            let issue = ValidationIssue::MissingMonth;
            self.notify(Notice::error(issue.to_string()));
            return Err(EvalError::Validation { issues: vec![issue] });
        };

        if let Some(found) = self
            .store
            .find_duplicate(&employee_id, period.month, period.year)
            .cloned()
        {
            warn!(
                employee_id = %employee_id,
                month = period.month,
                year = period.year,
                "Submission blocked by existing evaluation"
            );
            self.existing = Some(found);
            self.notify(Notice::error(format!(
                "An evaluation for {employee_name} already exists for {period}. Submission cancelled."
            )));
            return Err(EvalError::DuplicateEvaluation {
                employee_name,
                month: period.month,
                year: period.year,
            });
        }

        let overall = self.overall().ok_or_else(|| EvalError::Validation {
            issues: vec![ValidationIssue::NoGrades],
        })?;
        let payload = self.build_payload(employee_id, employee_name, period, overall);

        let backend = self.store.backend();
        let outcome = match backend.create_evaluation(&payload).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.notify(Notice::error(format!("Failed to submit evaluation: {err}")));
                return Err(err);
            }
        };

        if !self.is_accepted(&outcome) {
            let message = outcome
                .message
                .clone()
                .unwrap_or_else(|| "Failed to submit evaluation".to_string());
            warn!(status = outcome.status, message = %message, "Evaluation rejected");
            self.notify(Notice::error(message.clone()));
            return Err(EvalError::CreateRejected { message });
        }

        if !outcome.is_success_status() {
            warn!(
                status = outcome.status,
                "Treating non-2xx create response as success under any_response policy"
            );
        }
        info!(
            employee_id = %payload.employee_id,
            month = payload.month,
            year = payload.year,
            overall_grade = %payload.overall_grade,
            "Evaluation submitted"
        );
        self.notify(Notice::success(outcome.message.clone().unwrap_or_else(|| {
            format!("Evaluation for {} submitted for {period}", payload.employee_name)
        })));

        self.reset();
        self.schedule_refresh();
        Ok(SubmissionReceipt { payload, outcome })
    }

    /// Waits for a scheduled background refresh, if any, and installs it.
    pub async fn await_refresh(&mut self) {
        let Some(pending) = self.pending_refresh.take() else {
            return;
        };
        if let Ok(result) = pending.result.await {
            self.install_refresh(result);
        }
    }

    /// Returns true while a background refresh has not been installed.
    pub fn has_pending_refresh(&self) -> bool {
        self.pending_refresh.is_some()
    }

    /// Current editing mode.
    pub fn state(&self) -> FormState {
        if self.existing.is_some() {
            FormState::Locked
        } else {
            FormState::Editing
        }
    }

    /// The record that locks the form, if any.
    pub fn existing(&self) -> Option<&EvaluationRecord> {
        self.existing.as_ref()
    }

    /// The draft being edited.
    pub fn draft(&self) -> &EvaluationDraft {
        &self.draft
    }

    /// The employee directory, for populating a selector.
    pub fn employees(&self) -> &[Employee] {
        self.store.employees()
    }

    /// The underlying store.
    pub fn store(&self) -> &EvaluationStore {
        &self.store
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    fn ensure_unlocked(&self) -> EvalResult<()> {
        match (&self.existing, self.draft.period()) {
            (Some(_), Some(period)) => Err(EvalError::FormLocked {
                employee_id: self.draft.employee_id.to_string(),
                month: period.month,
                year: period.year,
            }),
            _ => Ok(()),
        }
    }

    fn resolve_name(&self, id: &EmployeeId) -> String {
        match self.store.employee(id) {
            Some(employee) => employee.display_name(),
            None => {
                warn!(employee_id = %id, "Employee not in directory");
                id.to_string()
            }
        }
    }

    /// Re-runs the duplicate guard for the draft and updates the lock.
    fn check_existing(&mut self) {
        let period = match self.draft.period() {
            Some(period) if !self.draft.employee_id.is_empty() => period,
            _ => {
                self.existing = None;
                return;
            }
        };

        self.existing = self
            .store
            .find_duplicate(&self.draft.employee_id, period.month, period.year)
            .cloned();

        if self.existing.is_some() {
            warn!(
                employee_id = %self.draft.employee_id,
                month = period.month,
                year = period.year,
                "Existing evaluation found, locking form"
            );
            self.notify(Notice::warning(format!(
                "An evaluation for {} already exists for {period}",
                self.draft.employee_name
            )));
        } else {
            debug!(employee_id = %self.draft.employee_id, %period, "No existing evaluation");
        }
    }

    fn is_accepted(&self, outcome: &CreateOutcome) -> bool {
        match self.config.success_policy {
            SuccessPolicy::HttpStatus => outcome.is_success_status(),
            SuccessPolicy::AnyResponse => true,
        }
    }

    fn build_payload(
        &self,
        employee_id: EmployeeId,
        employee_name: String,
        period: Period,
        overall: OverallGrade,
    ) -> EvaluationPayload {
        let now = self.clock.now();
        EvaluationPayload {
            employee_id,
            employee_name,
            month: period.month,
            year: period.year,
            grades: self.draft.grades.clone(),
            notes: self.draft.notes.clone(),
            overall_grade: overall.grade,
            overall_gpa: overall.gpa,
            evaluation_date: now,
            evaluator_role: self.config.evaluator_role.clone(),
            created_at: now,
        }
    }

    fn reset(&mut self) {
        self.draft = EvaluationDraft::fresh(previous_month(self.clock.today()));
        self.existing = None;
    }

    /// Starts the delayed refresh of the evaluation cache, superseding any
    /// refresh still pending.
    fn schedule_refresh(&mut self) {
        if let Some(previous) = self.pending_refresh.take() {
            previous.task.abort();
        }

        let backend = self.store.backend();
        let delay = self.config.refresh_delay();
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(backend.list_evaluations().await);
        });
        self.pending_refresh = Some(PendingRefresh { task, result: rx });
    }

    /// Installs a finished background refresh without waiting for one.
    fn absorb_refresh(&mut self) {
        let Some(pending) = self.pending_refresh.as_mut() else {
            return;
        };
        match pending.result.try_recv() {
            Ok(result) => {
                self.pending_refresh = None;
                self.install_refresh(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => self.pending_refresh = None,
        }
    }

    fn install_refresh(&mut self, result: RefreshResult) {
        match result {
            Ok(records) => {
                self.store.replace_evaluations(records);
                if !self.draft.employee_id.is_empty() {
                    self.check_existing();
                }
            }
            Err(err) => warn!(error = %err, "Background evaluation refresh failed"),
        }
    }
}

impl Drop for EvaluationFormController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_refresh.take() {
            pending.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::clock::FixedClock;
    use crate::workflow::notify::{NoticeLevel, NoticeLog};
    use crate::workflow::testing::{FakeBackend, record};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    struct Harness {
        controller: EvaluationFormController,
        backend: Arc<FakeBackend>,
        notices: Arc<NoticeLog>,
    }

    fn create_test_controller(backend: FakeBackend, today: (i32, u32, u32)) -> Harness {
        let backend = Arc::new(backend);
        let notices = Arc::new(NoticeLog::new());
        let mut config = ClientConfig::default();
        config.refresh_delay_ms = 0;

        let today = NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap();
        let controller = EvaluationFormController::new(EvaluationStore::new(backend.clone()), config)
            .with_notifier(notices.clone())
            .with_clock(Arc::new(FixedClock::on(today)));

        Harness {
            controller,
            backend,
            notices,
        }
    }

    fn directory() -> Vec<Employee> {
        vec![Employee::named("E1", "Ada Lovelace"), Employee::named("E2", "Grace Hopper")]
    }

    #[tokio::test]
    async fn test_initialize_loads_evaluations_before_employees() {
        let mut h = create_test_controller(FakeBackend::new().with_employees(directory()), (2024, 3, 15));
        h.controller.initialize().await;

        assert_eq!(h.backend.calls(), vec!["evaluations", "employees"]);
        assert_eq!(h.controller.employees().len(), 2);
        assert!(h.notices.notices().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_reports_failures_without_aborting() {
        let backend = FakeBackend::new().with_employees(directory());
        backend.fail_reads(true);
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;

        assert_eq!(h.backend.calls(), vec!["evaluations", "employees"]);
        assert_eq!(h.notices.of_level(NoticeLevel::Warning).len(), 1);
        assert_eq!(h.notices.of_level(NoticeLevel::Error).len(), 1);
        assert!(h.controller.employees().is_empty());
    }

    #[test]
    fn test_fresh_draft_defaults_to_previous_month() {
        let h = create_test_controller(FakeBackend::new(), (2024, 3, 15));
        let draft = h.controller.draft();

        assert_eq!(draft.month, Some(2));
        assert_eq!(draft.year, Some(2024));
        assert!(draft.employee_id.is_empty());
        assert!(draft.grades.is_empty());
        assert_eq!(h.controller.state(), FormState::Editing);
    }

    #[test]
    fn test_january_defaults_to_previous_december() {
        let h = create_test_controller(FakeBackend::new(), (2025, 1, 20));
        assert_eq!(h.controller.draft().period(), Period::new(12, 2024));
    }

    #[tokio::test]
    async fn test_select_employee_with_existing_record_locks_form() {
        let backend = FakeBackend::new()
            .with_employees(directory())
            .with_evaluations(vec![record("E1", 2, 2024)]);
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;

        h.controller.select_employee("E1");

        assert_eq!(h.controller.state(), FormState::Locked);
        assert_eq!(h.controller.draft().employee_id.as_str(), "E1");
        assert_eq!(h.controller.draft().employee_name, "Ada Lovelace");
        assert_eq!(h.controller.draft().month, Some(2));

        let warnings = h.notices.of_level(NoticeLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "An evaluation for Ada Lovelace already exists for February 2024"
        );

        assert!(matches!(
            h.controller.set_grade(Category::Work, Some(Grade::A)),
            Err(EvalError::FormLocked { .. })
        ));
        assert!(h.controller.set_notes("late again").is_err());
    }

    #[tokio::test]
    async fn test_changing_month_unlocks_form() {
        let backend = FakeBackend::new()
            .with_employees(directory())
            .with_evaluations(vec![record("E1", 2, 2024)]);
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");
        assert_eq!(h.controller.state(), FormState::Locked);

        h.controller.set_period(PeriodField::Month, 3);

        assert_eq!(h.controller.state(), FormState::Editing);
        assert!(h.controller.existing().is_none());
        assert!(h.controller.set_grade(Category::Work, Some(Grade::B)).is_ok());
    }

    #[tokio::test]
    async fn test_changing_year_into_conflict_locks_form() {
        let backend = FakeBackend::new()
            .with_employees(directory())
            .with_evaluations(vec![record("E2", 2, 2023)]);
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E2");
        assert_eq!(h.controller.state(), FormState::Editing);

        h.controller.set_period(PeriodField::Year, 2023);
        assert_eq!(h.controller.state(), FormState::Locked);
    }

    #[test]
    fn test_zero_and_out_of_range_period_values_are_ignored() {
        let mut h = create_test_controller(FakeBackend::new(), (2024, 3, 15));

        h.controller.set_period(PeriodField::Month, 0);
        h.controller.set_period(PeriodField::Month, 13);
        h.controller.set_period(PeriodField::Year, 0);

        assert_eq!(h.controller.draft().period(), Period::new(2, 2024));
    }

    #[tokio::test]
    async fn test_clearing_selection_unlocks() {
        let backend = FakeBackend::new()
            .with_employees(directory())
            .with_evaluations(vec![record("E1", 2, 2024)]);
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");

        h.controller.select_employee("");

        assert_eq!(h.controller.state(), FormState::Editing);
        assert!(h.controller.draft().employee_id.is_empty());
        assert!(h.controller.draft().employee_name.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_employee_uses_id_as_name() {
        let mut h = create_test_controller(FakeBackend::new(), (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E9");
        assert_eq!(h.controller.draft().employee_name, "E9");
    }

    #[tokio::test]
    async fn test_submit_sends_payload_and_resets() {
        let mut h = create_test_controller(FakeBackend::new().with_employees(directory()), (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Work, Some(Grade::A)).unwrap();
        h.controller.set_grade(Category::Leave, Some(Grade::B)).unwrap();
        h.controller.set_notes("Solid month").unwrap();

        let receipt = h.controller.submit().await.unwrap();

        let payload = &receipt.payload;
        assert_eq!(payload.employee_id.as_str(), "E1");
        assert_eq!(payload.employee_name, "Ada Lovelace");
        assert_eq!((payload.month, payload.year), (2, 2024));
        assert_eq!(payload.overall_grade, Grade::A);
        assert_eq!(payload.overall_gpa, Decimal::new(350, 2));
        assert_eq!(payload.notes, "Solid month");
        assert_eq!(payload.evaluator_role, "HR");
        assert_eq!(payload.created_at.to_rfc3339(), "2024-03-15T12:00:00+00:00");
        assert_eq!(h.backend.created().len(), 1);

        let draft = h.controller.draft();
        assert!(draft.employee_id.is_empty());
        assert!(draft.grades.is_empty());
        assert!(draft.notes.is_empty());
        assert_eq!(draft.period(), Period::new(2, 2024));
        assert_eq!(h.notices.of_level(NoticeLevel::Success).len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let mut h = create_test_controller(FakeBackend::new(), (2024, 3, 15));

        match h.controller.submit().await {
            Err(EvalError::Validation { issues }) => {
                assert_eq!(issues, vec![ValidationIssue::MissingEmployee, ValidationIssue::NoGrades]);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(h.backend.created().is_empty());
        assert_eq!(h.notices.of_level(NoticeLevel::Error).len(), 2);
    }

    #[tokio::test]
    async fn test_out_of_range_month_is_reported_and_not_sent() {
        let mut h = create_test_controller(FakeBackend::new().with_employees(directory()), (2024, 3, 15));
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Work, Some(Grade::A)).unwrap();
        h.controller.draft.month = Some(13);

        match h.controller.submit().await {
            Err(EvalError::Validation { issues }) => {
                assert_eq!(issues, vec![ValidationIssue::MissingMonth]);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(h.backend.created().is_empty());
        assert_eq!(
            h.notices.of_level(NoticeLevel::Error),
            vec![Notice::error("Please select a month")]
        );
    }

    #[tokio::test]
    async fn test_duplicate_created_meanwhile_blocks_submit() {
        let mut h = create_test_controller(FakeBackend::new().with_employees(directory()), (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E2");
        h.controller.set_grade(Category::Speed, Some(Grade::C)).unwrap();

        // Another session files the same evaluation; the cache learns of it.
        h.backend.insert_evaluation(record("E2", 2, 2024));
        h.controller.store.load_evaluations().await.unwrap();

        let result = h.controller.submit().await;

        assert!(matches!(
            result,
            Err(EvalError::DuplicateEvaluation { month: 2, year: 2024, .. })
        ));
        assert!(h.backend.created().is_empty());
        assert_eq!(h.controller.state(), FormState::Locked);
        assert_eq!(h.controller.draft().grades.speed, Some(Grade::C));
    }

    #[tokio::test]
    async fn test_rejected_create_keeps_draft() {
        let backend = FakeBackend::new().with_employees(directory());
        backend.respond_to_create(500, Some("Database unavailable"));
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Time, Some(Grade::D)).unwrap();

        let result = h.controller.submit().await;

        match result {
            Err(EvalError::CreateRejected { message }) => assert_eq!(message, "Database unavailable"),
            other => panic!("Expected CreateRejected, got {:?}", other),
        }
        assert_eq!(h.controller.draft().employee_id.as_str(), "E1");
        assert_eq!(h.controller.draft().grades.time, Some(Grade::D));
        assert!(!h.controller.has_pending_refresh());
    }

    #[tokio::test]
    async fn test_rejected_create_without_message_uses_generic_text() {
        let backend = FakeBackend::new().with_employees(directory());
        backend.respond_to_create(400, None);
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Time, Some(Grade::B)).unwrap();

        assert!(h.controller.submit().await.is_err());
        assert_eq!(
            h.notices.of_level(NoticeLevel::Error),
            vec![Notice::error("Failed to submit evaluation")]
        );
    }

    #[tokio::test]
    async fn test_any_response_policy_accepts_error_status() {
        let backend = Arc::new(FakeBackend::new().with_employees(directory()));
        backend.respond_to_create(500, Some("Internal error"));
        let notices = Arc::new(NoticeLog::new());
        let mut config = ClientConfig::default();
        config.success_policy = SuccessPolicy::AnyResponse;
        config.refresh_delay_ms = 0;
        let mut controller = EvaluationFormController::new(EvaluationStore::new(backend.clone()), config)
            .with_notifier(notices.clone())
            .with_clock(Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())));
        controller.select_employee("E1");
        controller.set_grade(Category::Work, Some(Grade::A)).unwrap();

        let receipt = controller.submit().await.unwrap();

        assert_eq!(receipt.outcome.status, 500);
        assert!(controller.draft().employee_id.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_draft() {
        let backend = FakeBackend::new().with_employees(directory());
        let mut h = create_test_controller(backend, (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Behaviour, Some(Grade::A)).unwrap();
        h.backend.fail_transport(true);

        assert!(matches!(h.controller.submit().await, Err(EvalError::Transport { .. })));
        assert_eq!(h.controller.draft().grades.behaviour, Some(Grade::A));
        assert_eq!(h.notices.of_level(NoticeLevel::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_after_submit_updates_cache() {
        let mut h = create_test_controller(FakeBackend::new().with_employees(directory()), (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Work, Some(Grade::B)).unwrap();
        h.controller.submit().await.unwrap();
        assert!(h.controller.has_pending_refresh());

        h.controller.await_refresh().await;

        assert!(!h.controller.has_pending_refresh());
        assert_eq!(h.backend.evaluation_reads(), 2);
        assert!(h.controller.store().find_duplicate(&EmployeeId::new("E1"), 2, 2024).is_some());

        h.controller.select_employee("E1");
        assert_eq!(h.controller.state(), FormState::Locked);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_silent() {
        let mut h = create_test_controller(FakeBackend::new().with_employees(directory()), (2024, 3, 15));
        h.controller.initialize().await;
        h.controller.select_employee("E1");
        h.controller.set_grade(Category::Work, Some(Grade::B)).unwrap();
        h.controller.submit().await.unwrap();
        h.notices.take();

        h.backend.fail_reads(true);
        h.controller.await_refresh().await;

        assert!(h.notices.notices().is_empty());
        assert!(h.controller.store().evaluations().is_empty());
    }
}
