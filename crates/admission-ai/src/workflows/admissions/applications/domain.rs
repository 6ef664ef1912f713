use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// One admission requirement attached to a programme.
///
/// `minimum_grade` is a grade symbol; anything the grade scale cannot resolve
/// is treated as the worst rank, which makes the requirement hardest to meet
/// rather than rejecting the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub subject: String,
    pub minimum_grade: String,
    pub is_required: bool,
}

/// Academic record supplied by an applicant, keyed by subject name.
///
/// Subject grades are raw symbols as stored; evaluation falls back to
/// `overall_grade` for any requirement subject missing from `subjects`.
/// `certificate_url` is an opaque reference into the external document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub qualification_type: String,
    pub institution_name: String,
    pub year_completed: u16,
    pub subjects: BTreeMap<String, String>,
    pub overall_grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

/// Applicant-provided payload used to open a new application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub applicant_id: String,
    pub programme_id: String,
    pub campus: String,
    pub qualifications: Vec<Qualification>,
}

/// High level status tracked throughout the admission workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Admitted,
    Waitlisted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Admitted => "admitted",
            ApplicationStatus::Waitlisted => "waitlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// Active applications block the applicant from submitting another one.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending
                | ApplicationStatus::UnderReview
                | ApplicationStatus::Admitted
                | ApplicationStatus::Waitlisted
        )
    }
}

/// Officer decision metadata stamped onto an application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerReview {
    pub officer_id: String,
    pub decision: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}
