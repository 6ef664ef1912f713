use serde::{Deserialize, Serialize};

/// Recommendation thresholds applied to the percentage score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub admit_threshold: f64,
    pub waitlist_threshold: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            admit_threshold: 70.0,
            waitlist_threshold: 50.0,
        }
    }
}
