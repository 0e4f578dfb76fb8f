//! The evaluation submission workflow.
//!
//! [`EvaluationStore`] caches what the backend knows; the
//! [`EvaluationFormController`] owns the draft and decides what may be sent.
//! Both are plain owned values driven by explicit method calls from a single
//! task.

mod clock;
mod controller;
mod notify;
mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{EvaluationFormController, FormState, PeriodField, SubmissionReceipt};
pub use notify::{Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
pub use store::EvaluationStore;
