use admission_ai::config::AppConfig;
use admission_ai::workflows::admissions::applications::{
    AdmissionsRepository, ApplicationId, ApplicationRecord, ApplicationStatus, AuditError,
    AuditEvent, AuditSink, EvaluationConfig, RepositoryError, Requirement,
};
use chrono::Datelike;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAdmissionsRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
    requirements: Arc<Mutex<HashMap<String, Vec<Requirement>>>>,
}

impl InMemoryAdmissionsRepository {
    /// Repository pre-loaded with the demo programme catalogue. The catalogue
    /// stands in for the external programme management service until the
    /// store is backed by it.
    pub(crate) fn with_programme_catalogue() -> Self {
        let repository = Self::default();
        {
            let mut guard = repository
                .requirements
                .lock()
                .expect("repository mutex poisoned");
            for (programme_id, requirements) in programme_catalogue() {
                guard.insert(programme_id.to_string(), requirements);
            }
        }
        repository
    }
}

impl AdmissionsRepository for InMemoryAdmissionsRepository {
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
        let guard = self.requirements.lock().expect("repository mutex poisoned");
        Ok(guard.get(programme_id).cloned().unwrap_or_default())
    }

    fn pending_unscored(&self) -> Result<Vec<ApplicationId>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut ids: Vec<_> = guard
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
            .count();
        Ok(submitted as u32 + 1)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        let mut guard = self.events.lock().expect("audit mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

impl InMemoryAuditSink {
    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit mutex poisoned").clone()
    }
}

pub(crate) fn evaluation_config_from(config: &AppConfig) -> EvaluationConfig {
    EvaluationConfig {
        admit_threshold: config.evaluation.admit_threshold,
        waitlist_threshold: config.evaluation.waitlist_threshold,
    }
}

fn requirement(subject: &str, minimum_grade: &str, is_required: bool) -> Requirement {
    Requirement {
        subject: subject.to_string(),
        minimum_grade: minimum_grade.to_string(),
        is_required,
    }
}

fn programme_catalogue() -> Vec<(&'static str, Vec<Requirement>)> {
    vec![
        (
            "PRG-CS-01",
            vec![
                requirement("Mathematics", "B3", true),
                requirement("English", "C4", true),
                requirement("Physics", "C5", false),
            ],
        ),
        (
            "PRG-BA-02",
            vec![
                requirement("Mathematics", "C4", true),
                requirement("English", "C4", true),
            ],
        ),
        (
            "PRG-NUR-03",
            vec![
                requirement("Biology", "B3", true),
                requirement("Chemistry", "C4", true),
                requirement("English", "C5", true),
            ],
        ),
    ]
}
