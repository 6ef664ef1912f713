use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Datelike;
use serde_json::Value;

use crate::workflows::admissions::applications::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, Qualification, Requirement,
};
use crate::workflows::admissions::applications::evaluation::EvaluationEngine;
use crate::workflows::admissions::applications::repository::{
    AdmissionsRepository, ApplicationRecord, AuditError, AuditEvent, AuditSink, RepositoryError,
};
use crate::workflows::admissions::applications::{
    admissions_router, AdmissionsService, EvaluationConfig,
};

pub(super) const PROGRAMME_ID: &str = "PRG-CS-01";
pub(super) const CAMPUS: &str = "Main Campus";

pub(super) fn requirement(subject: &str, minimum_grade: &str, is_required: bool) -> Requirement {
    Requirement {
        subject: subject.to_string(),
        minimum_grade: minimum_grade.to_string(),
        is_required,
    }
}

pub(super) fn programme_requirements() -> Vec<Requirement> {
    vec![
        requirement("Mathematics", "B3", true),
        requirement("English", "C4", true),
    ]
}

pub(super) fn qualification(overall_grade: &str, subjects: &[(&str, &str)]) -> Qualification {
    Qualification {
        qualification_type: "WASSCE".to_string(),
        institution_name: "Accra Academy".to_string(),
        year_completed: 2024,
        subjects: subjects
            .iter()
            .map(|(subject, grade)| (subject.to_string(), grade.to_string()))
            .collect(),
        overall_grade: overall_grade.to_string(),
        certificate_url: None,
    }
}

pub(super) fn submission_for(applicant_id: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        applicant_id: applicant_id.to_string(),
        programme_id: PROGRAMME_ID.to_string(),
        campus: CAMPUS.to_string(),
        qualifications: vec![qualification(
            "B2",
            &[("Mathematics", "A1"), ("English", "B3")],
        )],
    }
}

/// Strong profile: passes both required subjects with a good overall grade.
pub(super) fn submission() -> ApplicationSubmission {
    submission_for("applicant-001")
}

/// Passes both requirements at the margin with a weak overall grade, landing
/// between the waitlist and admit thresholds.
pub(super) fn waitlist_submission() -> ApplicationSubmission {
    let mut submission = submission_for("applicant-002");
    submission.qualifications = vec![qualification(
        "D7",
        &[("Mathematics", "B3"), ("English", "C4")],
    )];
    submission
}

/// High score but fails the required English minimum, so the gate rejects it.
pub(super) fn failing_required_submission() -> ApplicationSubmission {
    let mut submission = submission_for("applicant-003");
    submission.qualifications = vec![qualification(
        "B2",
        &[("Mathematics", "A1"), ("English", "C6")],
    )];
    submission
}

pub(super) fn build_service() -> (
    AdmissionsService<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::with_standard_programme());
    let audit = Arc::new(MemoryAudit::default());
    let service = AdmissionsService::new(
        repository.clone(),
        audit.clone(),
        EvaluationConfig::default(),
    );
    (service, repository, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
    requirements: Arc<Mutex<HashMap<String, Vec<Requirement>>>>,
    broken_programmes: Arc<Mutex<HashSet<String>>>,
}

impl MemoryRepository {
    pub(super) fn with_standard_programme() -> Self {
        let repository = Self::default();
        repository.set_requirements(PROGRAMME_ID, programme_requirements());
        repository
    }

    pub(super) fn set_requirements(&self, programme_id: &str, requirements: Vec<Requirement>) {
        self.requirements
            .lock()
            .expect("repository mutex poisoned")
            .insert(programme_id.to_string(), requirements);
    }

    /// Simulate a requirements read outage for one programme.
    pub(super) fn poison_programme(&self, programme_id: &str) {
        self.broken_programmes
            .lock()
            .expect("repository mutex poisoned")
            .insert(programme_id.to_string());
    }
}

impl AdmissionsRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, mut record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard
            .get_mut(&record.application_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.version != record.version {
            return Err(RepositoryError::Conflict);
        }
        record.version += 1;
        *stored = record.clone();
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn requirements(&self, programme_id: &str) -> Result<Vec<Requirement>, RepositoryError> {
        if self
            .broken_programmes
            .lock()
            .expect("repository mutex poisoned")
            .contains(programme_id)
        {
            return Err(RepositoryError::Unavailable(
                "requirements table offline".to_string(),
            ));
        }
        let guard = self.requirements.lock().expect("repository mutex poisoned");
        Ok(guard.get(programme_id).cloned().unwrap_or_default())
    }

    fn pending_unscored(&self) -> Result<Vec<ApplicationId>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut ids: Vec<ApplicationId> = guard
            .values()
            .filter(|record| {
                record.status == ApplicationStatus::Pending && record.evaluation.is_none()
            })
            .map(|record| record.application_id.clone())
            .collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(ids)
    }

    fn active_count(&self, applicant_id: &str) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.applicant_id == applicant_id && record.status.is_active())
            .count())
    }

    fn annual_sequence(&self, year: i32) -> Result<u32, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let submitted = guard
            .values()
            .filter(|record| record.submitted_at.year() == year)
            .count() as u32;
        Ok(submitted + 1)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MemoryAudit {
    pub(super) fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .expect("audit mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct FailingAudit;

impl AuditSink for FailingAudit {
    fn record(&self, _event: AuditEvent) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("audit log offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl AdmissionsRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn requirements(&self, _programme_id: &str) -> Result<Vec<Requirement>, RepositoryError> {
        Ok(Vec::new())
    }

    fn pending_unscored(&self) -> Result<Vec<ApplicationId>, RepositoryError> {
        Ok(Vec::new())
    }

    fn active_count(&self, _applicant_id: &str) -> Result<usize, RepositoryError> {
        Ok(0)
    }

    fn annual_sequence(&self, _year: i32) -> Result<u32, RepositoryError> {
        Ok(1)
    }
}

pub(super) struct UnavailableRepository;

impl AdmissionsRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn requirements(&self, _programme_id: &str) -> Result<Vec<Requirement>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending_unscored(&self) -> Result<Vec<ApplicationId>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active_count(&self, _applicant_id: &str) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn annual_sequence(&self, _year: i32) -> Result<u32, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn evaluation_engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default())
}

pub(super) fn admissions_router_with_service(
    service: AdmissionsService<MemoryRepository, MemoryAudit>,
) -> axum::Router {
    admissions_router(Arc::new(service))
}
