//! Admission application intake, AI evaluation, and review lifecycle.
//!
//! The evaluation engine scores submitted qualifications against programme
//! requirements and records an advisory recommendation; officers confirm or
//! override the result through explicit status decisions.

pub mod domain;
pub(crate) mod evaluation;
pub(crate) mod grading;
pub(crate) mod lifecycle;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, OfficerReview, Qualification,
    Requirement,
};
pub use evaluation::{EvaluationConfig, EvaluationOutcome, Recommendation};
pub use lifecycle::{LifecycleError, ValidationError};
pub use repository::{
    AdmissionsRepository, ApplicationRecord, ApplicationStatusView, AuditError, AuditEvent,
    AuditSink, RepositoryError,
};
pub use router::admissions_router;
pub use service::{
    AdmissionServiceError, AdmissionsService, BatchEntry, BatchEvaluationReport, BatchOutcome,
};
