use super::policy::Recommendation;
use super::rules::ScoreBreakdown;

/// Render the audit trail officers read alongside the recommendation.
///
/// Line order mirrors processing order exactly, one line per requirement
/// check followed by one line per qualification's overall tier. Officers
/// cross-reference the trail against transcripts, so entries are never
/// reordered or deduplicated.
pub(crate) fn render(
    breakdown: &ScoreBreakdown,
    percentage: f64,
    recommendation: Recommendation,
) -> String {
    let mut lines = Vec::new();

    for assessment in &breakdown.assessments {
        for check in &assessment.checks {
            if check.passed {
                lines.push(format!(
                    "\u{2713} {}: {} (meets requirement: {})",
                    check.subject, check.grade_used, check.minimum_grade
                ));
            } else {
                lines.push(format!(
                    "\u{2717} {}: {} (below requirement: {})",
                    check.subject, check.grade_used, check.minimum_grade
                ));
            }
        }

        lines.push(format!(
            "{} Overall grade: {} ({})",
            assessment.overall_band.marker(),
            assessment.overall_grade,
            assessment.overall_band.label()
        ));
    }

    let meets = if breakdown.meets_requirements {
        "Yes"
    } else {
        "No"
    };

    format!(
        "{}\n\nOverall Score: {:.2}%\nMeets Requirements: {}\nRecommendation: {}",
        lines.join("\n"),
        percentage,
        meets,
        recommendation.label().to_uppercase()
    )
}
