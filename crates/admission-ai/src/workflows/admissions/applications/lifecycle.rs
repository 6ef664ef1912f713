use super::domain::{ApplicationStatus, ApplicationSubmission};
use super::evaluation::Recommendation;

/// Validation errors raised during application intake.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("submission does not name a programme")]
    MissingProgramme,
    #[error("submission does not name a campus")]
    MissingCampus,
    #[error("submission carries no qualifications")]
    NoQualifications,
}

/// Transition errors raised by the status state machine.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("applicant already has an active application")]
    DuplicateActiveApplication,
    #[error("unknown application status '{0}'")]
    InvalidStatus(String),
}

/// Check a submission payload before any identifier is issued.
pub(crate) fn validate_submission(
    submission: &ApplicationSubmission,
) -> Result<(), ValidationError> {
    if submission.programme_id.trim().is_empty() {
        return Err(ValidationError::MissingProgramme);
    }
    if submission.campus.trim().is_empty() {
        return Err(ValidationError::MissingCampus);
    }
    if submission.qualifications.is_empty() {
        return Err(ValidationError::NoQualifications);
    }
    Ok(())
}

/// Status applied after the engine produces a recommendation.
///
/// Admit and reject both land in `under_review`: the AI output is advisory
/// and an officer confirms the final decision. Waitlist is the one shortcut
/// the engine may apply directly.
pub(crate) const fn status_after_evaluation(recommendation: Recommendation) -> ApplicationStatus {
    match recommendation {
        Recommendation::Admit | Recommendation::Reject => ApplicationStatus::UnderReview,
        Recommendation::Waitlist => ApplicationStatus::Waitlisted,
    }
}

/// Resolve a wire label to a status an officer may set.
///
/// Officers may move an application between any two known statuses; the only
/// hard rejection is a label outside the closed set.
pub(crate) fn parse_status(label: &str) -> Result<ApplicationStatus, LifecycleError> {
    match label {
        "pending" => Ok(ApplicationStatus::Pending),
        "under_review" => Ok(ApplicationStatus::UnderReview),
        "admitted" => Ok(ApplicationStatus::Admitted),
        "waitlisted" => Ok(ApplicationStatus::Waitlisted),
        "rejected" => Ok(ApplicationStatus::Rejected),
        "withdrawn" => Ok(ApplicationStatus::Withdrawn),
        other => Err(LifecycleError::InvalidStatus(other.to_string())),
    }
}
