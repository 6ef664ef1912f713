use super::super::domain::{Qualification, Requirement};
use super::super::grading;

/// Points at stake per requirement check.
const REQUIREMENT_WEIGHT: u32 = 10;
/// Points at stake per qualification's overall grade.
const OVERALL_WEIGHT: u32 = 20;

/// One requirement matched against one qualification.
pub(crate) struct RequirementCheck {
    pub(crate) subject: String,
    pub(crate) grade_used: String,
    pub(crate) minimum_grade: String,
    pub(crate) passed: bool,
    pub(crate) awarded: u32,
    pub(crate) required: bool,
}

/// Quality tier for a qualification's overall grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverallBand {
    Good,
    Average,
    Poor,
}

impl OverallBand {
    fn for_rank(rank: u8) -> Self {
        if rank <= 6 {
            OverallBand::Good
        } else if rank <= 8 {
            OverallBand::Average
        } else {
            OverallBand::Poor
        }
    }

    pub(crate) const fn awarded(self) -> u32 {
        match self {
            OverallBand::Good => OVERALL_WEIGHT,
            OverallBand::Average => OVERALL_WEIGHT / 2,
            OverallBand::Poor => 0,
        }
    }

    pub(crate) const fn marker(self) -> &'static str {
        match self {
            OverallBand::Good => "\u{2713}",
            OverallBand::Average => "\u{25cb}",
            OverallBand::Poor => "\u{2717}",
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            OverallBand::Good => "good",
            OverallBand::Average => "average",
            OverallBand::Poor => "poor",
        }
    }
}

/// Every requirement check for one qualification plus its overall tier.
pub(crate) struct QualificationAssessment {
    pub(crate) checks: Vec<RequirementCheck>,
    pub(crate) overall_grade: String,
    pub(crate) overall_band: OverallBand,
}

/// Accumulated scoring state across all qualifications.
pub(crate) struct ScoreBreakdown {
    pub(crate) assessments: Vec<QualificationAssessment>,
    pub(crate) total: u32,
    pub(crate) max: u32,
    pub(crate) meets_requirements: bool,
}

impl ScoreBreakdown {
    /// Normalized score; an empty breakdown scores zero rather than dividing.
    pub(crate) fn percentage(&self) -> f64 {
        if self.max > 0 {
            f64::from(self.total) / f64::from(self.max) * 100.0
        } else {
            0.0
        }
    }
}

fn check_requirement(qualification: &Qualification, requirement: &Requirement) -> RequirementCheck {
    // Missing subject entries fall back to the overall grade on purpose: the
    // transcript may roll minor subjects into a single composite result.
    let grade_used = qualification
        .subjects
        .get(&requirement.subject)
        .cloned()
        .unwrap_or_else(|| qualification.overall_grade.clone());

    let grade_rank = grading::rank(&grade_used);
    let minimum_rank = grading::rank(&requirement.minimum_grade);
    let passed = grade_rank <= minimum_rank;

    // Passing pays out proportionally to grade strength; failing still earns
    // partial credit for near misses but never the full weight.
    let awarded = if passed {
        REQUIREMENT_WEIGHT - u32::from(grade_rank) + 1
    } else {
        REQUIREMENT_WEIGHT.saturating_sub(u32::from(grade_rank))
    };

    RequirementCheck {
        subject: requirement.subject.clone(),
        grade_used,
        minimum_grade: requirement.minimum_grade.clone(),
        passed,
        awarded,
        required: requirement.is_required,
    }
}

/// Score every qualification against every programme requirement.
///
/// A failed check on a required subject flips `meets_requirements` for the
/// whole breakdown; partial credit keeps accruing but the gate never resets.
pub(crate) fn score_qualifications(
    qualifications: &[Qualification],
    requirements: &[Requirement],
) -> ScoreBreakdown {
    let mut assessments = Vec::with_capacity(qualifications.len());
    let mut total: u32 = 0;
    let mut max: u32 = 0;
    let mut meets_requirements = true;

    for qualification in qualifications {
        let mut checks = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let check = check_requirement(qualification, requirement);
            max += REQUIREMENT_WEIGHT;
            total += check.awarded;
            if !check.passed && check.required {
                meets_requirements = false;
            }
            checks.push(check);
        }

        let overall_band = OverallBand::for_rank(grading::rank(&qualification.overall_grade));
        max += OVERALL_WEIGHT;
        total += overall_band.awarded();

        assessments.push(QualificationAssessment {
            checks,
            overall_grade: qualification.overall_grade.clone(),
            overall_band,
        });
    }

    ScoreBreakdown {
        assessments,
        total,
        max,
        meets_requirements,
    }
}
