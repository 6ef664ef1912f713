use crate::infra::{InMemoryAdmissionsRepository, InMemoryAuditSink};
use admission_ai::error::AppError;
use admission_ai::workflows::admissions::applications::{
    AdmissionsService, ApplicationSubmission, EvaluationConfig, Qualification,
};
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Programme to apply against (defaults to the seeded computer science programme)
    #[arg(long)]
    pub(crate) programme: Option<String>,
    /// Skip the officer review portion of the demo
    #[arg(long)]
    pub(crate) skip_review: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        programme,
        skip_review,
    } = args;
    let programme_id = programme.unwrap_or_else(|| "PRG-CS-01".to_string());

    println!("Admissions workflow demo");

    let repository = Arc::new(InMemoryAdmissionsRepository::with_programme_catalogue());
    let audit = Arc::new(InMemoryAuditSink::default());
    let service = Arc::new(AdmissionsService::new(
        repository,
        audit.clone(),
        EvaluationConfig::default(),
    ));

    let record = match service.submit(demo_submission(&programme_id)) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    let view = record.status_view();
    println!(
        "- Received application {} -> status {}",
        view.application_id.0, view.status
    );
    println!("  Decision rationale: {}", view.decision_rationale);

    match service.submit(demo_submission(&programme_id)) {
        Err(err) => println!("- Repeat submission blocked: {err}"),
        Ok(duplicate) => println!(
            "- Unexpected duplicate accepted: {}",
            duplicate.application_id.0
        ),
    }

    let outcome = match service.evaluate(&record.application_id) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Evaluation unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "- Evaluation recommendation: {} (score {:.2}%)",
        outcome.recommendation.label(),
        outcome.score
    );
    println!("  Explanation:");
    for line in outcome.explanation.lines() {
        println!("    {line}");
    }

    if skip_review {
        return Ok(());
    }

    let reviewed = match service.update_status(
        &record.application_id,
        "admitted",
        "officer-demo",
        Some("confirmed during walkthrough".to_string()),
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Officer review unavailable: {err}");
            return Ok(());
        }
    };
    match serde_json::to_string_pretty(&reviewed.status_view()) {
        Ok(json) => println!("- Final status payload:\n{json}"),
        Err(err) => println!("- Final status payload unavailable: {err}"),
    }

    let events = audit.events();
    if events.is_empty() {
        println!("- Audit trail: empty");
    } else {
        println!("- Audit trail:");
        for event in events {
            match event.application_id {
                Some(id) => println!("    - {} ({})", event.action, id.0),
                None => println!("    - {}", event.action),
            }
        }
    }

    Ok(())
}

fn demo_submission(programme_id: &str) -> ApplicationSubmission {
    let subjects: BTreeMap<String, String> = [
        ("Mathematics", "A1"),
        ("English", "B3"),
        ("Physics", "B2"),
    ]
    .into_iter()
    .map(|(subject, grade)| (subject.to_string(), grade.to_string()))
    .collect();

    ApplicationSubmission {
        applicant_id: "applicant-demo-001".to_string(),
        programme_id: programme_id.to_string(),
        campus: "Main Campus".to_string(),
        qualifications: vec![Qualification {
            qualification_type: "WASSCE".to_string(),
            institution_name: "Accra Academy".to_string(),
            year_completed: 2024,
            subjects,
            overall_grade: "B2".to_string(),
            certificate_url: Some("s3://admissions/certificates/demo-wassce.pdf".to_string()),
        }],
    }
}
