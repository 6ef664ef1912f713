use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationSubmission};
use super::lifecycle::LifecycleError;
use super::repository::{AdmissionsRepository, AuditSink, RepositoryError};
use super::service::{AdmissionServiceError, AdmissionsService};

/// Router builder exposing HTTP endpoints for intake, evaluation, and review.
pub fn admissions_router<R, A>(service: Arc<AdmissionsService<R, A>>) -> Router
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/admissions/applications",
            post(submit_handler::<R, A>),
        )
        .route(
            "/api/v1/admissions/applications/batch-evaluate",
            post(batch_evaluate_handler::<R, A>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id",
            get(status_handler::<R, A>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/evaluate",
            post(evaluate_handler::<R, A>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/status",
            put(status_update_handler::<R, A>),
        )
        .with_state(service)
}

/// Body accepted by the officer decision endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: String,
    pub(crate) officer_id: String,
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<AdmissionsService<R, A>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(AdmissionServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AdmissionServiceError::Lifecycle(LifecycleError::DuplicateActiveApplication)) => {
            let payload = json!({
                "error": "applicant already has an active application",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(AdmissionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, A>(
    State(service): State<Arc<AdmissionsService<R, A>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AdmissionServiceError::ApplicationNotFound) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, A>(
    State(service): State<Arc<AdmissionsService<R, A>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    let id = ApplicationId(application_id);
    match service.evaluate(&id) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(AdmissionServiceError::ApplicationNotFound) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(AdmissionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application was modified concurrently",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_evaluate_handler<R, A>(
    State(service): State<Arc<AdmissionsService<R, A>>>,
) -> Response
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    match service.evaluate_pending() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_update_handler<R, A>(
    State(service): State<Arc<AdmissionsService<R, A>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    R: AdmissionsRepository + 'static,
    A: AuditSink + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_status(&id, &request.status, &request.officer_id, request.notes) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AdmissionServiceError::Lifecycle(LifecycleError::InvalidStatus(label))) => {
            let payload = json!({
                "error": format!("unknown application status '{label}'"),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(AdmissionServiceError::ApplicationNotFound) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(AdmissionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application was modified concurrently",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
