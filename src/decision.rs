//! Turns a predicted probability into a label, advice, and an importance
//! ranking for display.

use crate::stats::StatsTable;

/// Predicted class for one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    LikelyDiabetic,
    LikelyNotDiabetic,
}

impl RiskLabel {
    /// Headline shown under the probability metric.
    pub fn headline(self) -> &'static str {
        match self {
            RiskLabel::LikelyDiabetic => "⚠️ Likely Diabetic",
            RiskLabel::LikelyNotDiabetic => "✅ Likely Not Diabetic",
        }
    }
}

/// Informational advisories attached to a positive prediction. Both can
/// fire at once; neither changes the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    SleepInsufficiency,
    LowActivity,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::SleepInsufficiency => {
                "🛌 You may not be sleeping enough — try aiming for 7–8 hours."
            }
            Advisory::LowActivity => {
                "🏃 Increasing your physical activity could help lower your risk."
            }
        }
    }
}

/// Advice block heading for a positive prediction.
pub const POSITIVE_ADVICE_TITLE: &str = "💡 Health Tips for You";
/// Advice lines shown with a positive prediction.
pub const POSITIVE_ADVICE: [&str; 5] = [
    "Reduce refined carbs and sugary drinks.",
    "Include fiber-rich foods like oats, lentils, and veggies.",
    "Exercise for at least 30 minutes daily (walking, cycling, swimming).",
    "Get your blood sugar checked regularly.",
    "Try to maintain 7–8 hours of sleep per night.",
];

/// Advice block heading for a negative prediction.
pub const NEGATIVE_ADVICE_TITLE: &str = "💪 Keep It Up!";
/// Advice lines shown with a negative prediction.
pub const NEGATIVE_ADVICE: [&str; 4] = [
    "Your risk looks low — maintain your healthy habits!",
    "Stay active and keep a balanced diet.",
    "Limit sugary snacks and alcohol.",
    "Continue getting regular checkups.",
];

/// Classify a probability against the decision threshold.
///
/// The boundary is inclusive: a probability exactly at the threshold is
/// labeled positive.
pub fn decide(probability: f64, threshold: f64) -> RiskLabel {
    if probability >= threshold {
        RiskLabel::LikelyDiabetic
    } else {
        RiskLabel::LikelyNotDiabetic
    }
}

/// Evaluate the lifestyle advisories for a positive prediction.
///
/// Both inputs are already-normalized values from the feature vector. The
/// sleep cutoff is "7 hours" expressed in the sleep feature's own z-score
/// space; the activity cutoff is the dataset mean (0 after normalization).
pub fn advisories(
    stats: &StatsTable,
    normalized_sleep: f64,
    normalized_activity: f64,
) -> Vec<Advisory> {
    let mut out = Vec::new();
    let sleep = stats.lookup("sleep");
    if normalized_sleep < (7.0 - sleep.mean) / sleep.std {
        out.push(Advisory::SleepInsufficiency);
    }
    if normalized_activity < 0.0 {
        out.push(Advisory::LowActivity);
    }
    out
}

/// One (feature, importance) pair in the display ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedImportance {
    pub feature: String,
    pub importance: f64,
}

/// Pair feature names with importances and sort descending.
///
/// The sort is stable, so ties keep the original training-order position.
pub fn rank_importances(names: &[String], importances: &[f64]) -> Vec<RankedImportance> {
    let mut ranked: Vec<RankedImportance> = names
        .iter()
        .zip(importances)
        .map(|(name, &importance)| RankedImportance {
            feature: name.clone(),
            importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

/// First `n` entries of a ranking (fewer if the ranking is shorter).
pub fn top(ranked: &[RankedImportance], n: usize) -> &[RankedImportance] {
    &ranked[..ranked.len().min(n)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert_eq!(decide(0.50, 0.50), RiskLabel::LikelyDiabetic);
        assert_eq!(decide(0.4999, 0.50), RiskLabel::LikelyNotDiabetic);
        assert_eq!(decide(0.51, 0.50), RiskLabel::LikelyDiabetic);
    }

    #[test]
    fn advisories_fire_independently() {
        let stats = StatsTable::baked();
        let sleep = stats.lookup("sleep");
        let seven = (7.0 - sleep.mean) / sleep.std;

        // Short sleep and low activity.
        let both = advisories(&stats, seven - 0.1, -0.5);
        assert_eq!(
            both,
            [Advisory::SleepInsufficiency, Advisory::LowActivity]
        );
        // Enough sleep at the exact cutoff, activity above the mean.
        let none = advisories(&stats, seven, 0.1);
        assert!(none.is_empty());
        // Only activity.
        let activity = advisories(&stats, seven + 1.0, -0.01);
        assert_eq!(activity, [Advisory::LowActivity]);
    }

    #[test]
    fn ranking_is_stable_descending() {
        let names: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let ranked = rank_importances(&names, &[0.1, 0.4, 0.1, 0.4]);
        let order: Vec<&str> = ranked.iter().map(|r| r.feature.as_str()).collect();
        // Ties keep original order: b before d, a before c.
        assert_eq!(order, ["b", "d", "a", "c"]);
    }

    #[test]
    fn top_slice_is_clamped_to_length() {
        let names: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let ranked = rank_importances(&names, &[0.2, 0.8]);
        assert_eq!(top(&ranked, 5).len(), 2);
        assert_eq!(top(&ranked, 1).len(), 1);
        assert_eq!(top(&ranked, 1)[0].feature, "b");
    }
}
