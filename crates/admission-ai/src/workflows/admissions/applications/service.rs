use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::warn;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission, OfficerReview};
use super::evaluation::{EvaluationConfig, EvaluationEngine, EvaluationOutcome};
use super::lifecycle::{self, LifecycleError, ValidationError};
use super::repository::{
    AdmissionsRepository, ApplicationRecord, AuditEvent, AuditSink, RepositoryError,
};

const APPLICATION_ID_PREFIX: &str = "ADM";

/// Service composing intake validation, the evaluation engine, the status
/// state machine, and the storage and audit collaborators.
pub struct AdmissionsService<R, A> {
    repository: Arc<R>,
    audit: Arc<A>,
    engine: Arc<EvaluationEngine>,
}

impl<R, A> AdmissionsService<R, A>
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<A>, config: EvaluationConfig) -> Self {
        let engine = Arc::new(EvaluationEngine::new(config));

        Self {
            repository,
            audit,
            engine,
        }
    }

    /// Submit a new application, returning the repository-backed record.
    ///
    /// Fails without writing anything when the payload is incomplete or the
    /// applicant already holds an active application.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        lifecycle::validate_submission(&submission)?;

        if self.repository.active_count(&submission.applicant_id)? > 0 {
            return Err(LifecycleError::DuplicateActiveApplication.into());
        }

        let now = Utc::now();
        let year = now.year();
        let sequence = self.repository.annual_sequence(year)?;
        let application_id = ApplicationId(format!("{APPLICATION_ID_PREFIX}{year}{sequence:05}"));

        let record = ApplicationRecord {
            application_id,
            applicant_id: submission.applicant_id,
            programme_id: submission.programme_id,
            campus: submission.campus,
            status: ApplicationStatus::Pending,
            qualifications: submission.qualifications,
            evaluation: None,
            officer_review: None,
            submitted_at: now,
            updated_at: now,
            version: 0,
        };

        let stored = self.repository.insert(record)?;

        let mut details = BTreeMap::new();
        details.insert("programme_id".to_string(), stored.programme_id.clone());
        details.insert("campus".to_string(), stored.campus.clone());
        self.record_audit(
            "application_submitted",
            Some(stored.application_id.clone()),
            Some(stored.applicant_id.clone()),
            details,
        );

        Ok(stored)
    }

    /// Evaluate one application and persist outcome and status together.
    ///
    /// Re-running replaces the stored outcome with a fresh computation.
    pub fn evaluate(
        &self,
        application_id: &ApplicationId,
    ) -> Result<EvaluationOutcome, AdmissionServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)
            .map_err(AdmissionServiceError::EvaluationData)?
            .ok_or(AdmissionServiceError::ApplicationNotFound)?;

        let requirements = self
            .repository
            .requirements(&record.programme_id)
            .map_err(AdmissionServiceError::EvaluationData)?;

        let outcome = self.engine.score(&record.qualifications, &requirements);

        record.status = lifecycle::status_after_evaluation(outcome.recommendation);
        record.evaluation = Some(outcome.clone());
        record.updated_at = Utc::now();

        let stored = self.repository.update(record)?;

        let mut details = BTreeMap::new();
        details.insert("score".to_string(), format!("{:.2}", outcome.score));
        details.insert(
            "recommendation".to_string(),
            outcome.recommendation.label().to_string(),
        );
        details.insert("status".to_string(), stored.status.label().to_string());
        self.record_audit(
            "application_evaluated",
            Some(stored.application_id.clone()),
            None,
            details,
        );

        Ok(outcome)
    }

    /// Evaluate every pending application without a stored outcome.
    ///
    /// Failures are isolated per application: one poisoned record is logged
    /// and reported as skipped while the rest of the batch proceeds.
    pub fn evaluate_pending(&self) -> Result<BatchEvaluationReport, AdmissionServiceError> {
        let pending = self.repository.pending_unscored()?;

        let mut evaluated = 0usize;
        let mut entries = Vec::with_capacity(pending.len());

        for application_id in pending {
            match self.evaluate(&application_id) {
                Ok(outcome) => {
                    evaluated += 1;
                    entries.push(BatchEntry {
                        application_id,
                        outcome: BatchOutcome::Evaluated { outcome },
                    });
                }
                Err(err) => {
                    warn!(
                        application_id = %application_id.0,
                        error = %err,
                        "skipping application during batch evaluation"
                    );
                    entries.push(BatchEntry {
                        application_id,
                        outcome: BatchOutcome::Skipped {
                            reason: err.to_string(),
                        },
                    });
                }
            }
        }

        let report = BatchEvaluationReport { evaluated, entries };

        let mut details = BTreeMap::new();
        details.insert("evaluated".to_string(), report.evaluated.to_string());
        details.insert("skipped".to_string(), report.skipped().to_string());
        self.record_audit("batch_evaluation_completed", None, None, details);

        Ok(report)
    }

    /// Apply an officer decision, stamping the review metadata.
    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        status_label: &str,
        officer_id: &str,
        notes: Option<String>,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        let status = lifecycle::parse_status(status_label)?;

        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(AdmissionServiceError::ApplicationNotFound)?;

        let now = Utc::now();
        record.status = status;
        record.officer_review = Some(OfficerReview {
            officer_id: officer_id.to_string(),
            decision: status,
            notes,
            decided_at: now,
        });
        record.updated_at = now;

        let stored = self.repository.update(record)?;

        let mut details = BTreeMap::new();
        details.insert("status".to_string(), status.label().to_string());
        self.record_audit(
            "status_updated",
            Some(stored.application_id.clone()),
            Some(officer_id.to_string()),
            details,
        );

        Ok(stored)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        self.repository
            .fetch(application_id)?
            .ok_or(AdmissionServiceError::ApplicationNotFound)
    }

    // Audit writes never fail the operation that produced them.
    fn record_audit(
        &self,
        action: &str,
        application_id: Option<ApplicationId>,
        actor: Option<String>,
        details: BTreeMap<String, String>,
    ) {
        let event = AuditEvent {
            action: action.to_string(),
            application_id,
            actor,
            details,
        };
        if let Err(err) = self.audit.record(event) {
            warn!(action, error = %err, "audit sink rejected event");
        }
    }
}

/// Summary of one batch evaluation run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEvaluationReport {
    pub evaluated: usize,
    pub entries: Vec<BatchEntry>,
}

impl BatchEvaluationReport {
    pub fn skipped(&self) -> usize {
        self.entries.len() - self.evaluated
    }
}

/// Per-application result inside a batch report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub application_id: ApplicationId,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BatchOutcome {
    Evaluated { outcome: EvaluationOutcome },
    Skipped { reason: String },
}

/// Error raised by the admissions service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("application not found")]
    ApplicationNotFound,
    #[error("evaluation inputs unavailable: {0}")]
    EvaluationData(#[source] RepositoryError),
}
