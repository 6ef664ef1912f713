use super::config::EvaluationConfig;
use serde::{Deserialize, Serialize};

/// Advisory category produced by the evaluation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Admit,
    Waitlist,
    Reject,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Admit => "admit",
            Recommendation::Waitlist => "waitlist",
            Recommendation::Reject => "reject",
        }
    }
}

/// Map a percentage score and the mandatory-requirements gate to a category.
///
/// The gate dominates: a failed required subject rejects regardless of score.
/// Thresholds compare against the unrounded percentage.
pub(crate) fn recommend(
    percentage: f64,
    meets_requirements: bool,
    config: &EvaluationConfig,
) -> Recommendation {
    if meets_requirements && percentage >= config.admit_threshold {
        Recommendation::Admit
    } else if meets_requirements && percentage >= config.waitlist_threshold {
        Recommendation::Waitlist
    } else {
        Recommendation::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let config = EvaluationConfig::default();
        assert_eq!(recommend(70.0, true, &config), Recommendation::Admit);
        assert_eq!(recommend(69.999, true, &config), Recommendation::Waitlist);
        assert_eq!(recommend(50.0, true, &config), Recommendation::Waitlist);
        assert_eq!(recommend(49.999, true, &config), Recommendation::Reject);
    }

    #[test]
    fn failed_gate_rejects_any_score() {
        let config = EvaluationConfig::default();
        assert_eq!(recommend(100.0, false, &config), Recommendation::Reject);
        assert_eq!(recommend(85.0, false, &config), Recommendation::Reject);
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let config = EvaluationConfig {
            admit_threshold: 90.0,
            waitlist_threshold: 80.0,
        };
        assert_eq!(recommend(85.0, true, &config), Recommendation::Waitlist);
        assert_eq!(recommend(79.0, true, &config), Recommendation::Reject);
    }
}
