mod config;
mod explanation;
mod policy;
mod rules;

pub use config::EvaluationConfig;
pub use policy::Recommendation;

use super::domain::{Qualification, Requirement};
use serde::{Deserialize, Serialize};

/// Stateless evaluator that scores qualifications against requirements.
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        qualifications: &[Qualification],
        requirements: &[Requirement],
    ) -> EvaluationOutcome {
        let breakdown = rules::score_qualifications(qualifications, requirements);
        let percentage = breakdown.percentage();

        let recommendation =
            policy::recommend(percentage, breakdown.meets_requirements, &self.config);
        let explanation = explanation::render(&breakdown, percentage, recommendation);

        EvaluationOutcome {
            // Stored rounded to two decimals; the recommendation above was
            // already decided on the unrounded value.
            score: (percentage * 100.0).round() / 100.0,
            recommendation,
            explanation,
            meets_requirements: breakdown.meets_requirements,
        }
    }
}

/// Evaluation output persisted onto the application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub score: f64,
    pub recommendation: Recommendation,
    pub explanation: String,
    pub meets_requirements: bool,
}
