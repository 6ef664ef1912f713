use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationStatus, OfficerReview, Qualification, Requirement,
};
use super::evaluation::EvaluationOutcome;

/// Repository record containing the application, its qualifications, and the
/// evaluation and review metadata accumulated over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub applicant_id: String,
    pub programme_id: String,
    pub campus: String,
    pub status: ApplicationStatus,
    pub qualifications: Vec<Qualification>,
    pub evaluation: Option<EvaluationOutcome>,
    pub officer_review: Option<OfficerReview>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic lock token, incremented by the store on every update.
    pub version: u64,
}

impl ApplicationRecord {
    pub fn decision_rationale(&self) -> String {
        match &self.evaluation {
            Some(outcome) => format!("ai recommendation: {}", outcome.recommendation.label()),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            status: self.status.label(),
            decision_rationale: self.decision_rationale(),
            score: self.evaluation.as_ref().map(|outcome| outcome.score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Programme requirements are owned by programme management and exposed
/// read-only through the same collaborator.
pub trait AdmissionsRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;

    /// Compare-and-set write covering every mutated field in one step.
    ///
    /// Implementations must reject a write whose `version` no longer matches
    /// the stored record with [`RepositoryError::Conflict`], and return the
    /// stored record with its version incremented on success.
    fn update(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;

    /// Admission requirements for one programme, possibly empty.
    fn requirements(&self, programme_id: &str) -> Result<Vec<Requirement>, RepositoryError>;

    /// Applications still pending with no stored evaluation, in submission order.
    fn pending_unscored(&self) -> Result<Vec<ApplicationId>, RepositoryError>;

    /// How many applications the applicant holds in an active status.
    fn active_count(&self, applicant_id: &str) -> Result<usize, RepositoryError>;

    /// Next identifier sequence number for the given calendar year, from 1.
    fn annual_sequence(&self, year: i32) -> Result<u32, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists or was modified concurrently")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the outbound audit trail hook.
///
/// Sinks are best effort: the service logs a failed write and carries on, so
/// an audit outage never blocks an admission decision.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Audit payload describing one recorded admission action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: String,
    pub application_id: Option<ApplicationId>,
    pub actor: Option<String>,
    pub details: BTreeMap<String, String>,
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
