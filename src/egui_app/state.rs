//! Shared state types for the egui UI.

use egui::Color32;

use crate::decision::RankedImportance;
use crate::features::{FEATURES, FeatureKind, TriState};
use crate::stats::StatsTable;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusState,
    pub form: FormState,
    /// Present after a successful Predict click; cleared on failure.
    pub result: Option<ResultState>,
}

impl UiState {
    /// Build the initial state with form fields defaulted from the
    /// statistics table, mirroring how the form seeds numeric inputs with
    /// the population mean.
    pub fn new(stats: &StatsTable) -> Self {
        Self {
            status: StatusState::idle(),
            form: FormState::with_defaults(stats),
            result: None,
        }
    }
}

/// Status line under the form.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusState {
    pub text: String,
    pub color: Color32,
}

impl StatusState {
    pub fn idle() -> Self {
        Self {
            text: "Enter your values and press Predict".into(),
            color: Color32::GRAY,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color32::GRAY,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color32::from_rgb(220, 100, 90),
        }
    }
}

/// One editable form field, aligned with [`FEATURES`] by index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormEntry {
    /// Numeric entry for continuous features and the 0/1 gender slider.
    Number { value: f64 },
    /// Select-box answer for the yes/no questions.
    Choice { value: TriState },
}

/// Raw form inputs, one entry per feature in training order.
#[derive(Clone, Debug)]
pub struct FormState {
    pub entries: Vec<FormEntry>,
}

impl FormState {
    /// Continuous fields default to the population mean, gender to 0, and
    /// the yes/no questions to "I don't know".
    pub fn with_defaults(stats: &StatsTable) -> Self {
        let entries = FEATURES
            .iter()
            .map(|spec| match spec.kind {
                FeatureKind::Continuous => FormEntry::Number {
                    value: stats.lookup(spec.name).mean,
                },
                FeatureKind::Gender => FormEntry::Number { value: 0.0 },
                FeatureKind::TriState => FormEntry::Choice {
                    value: TriState::Unknown,
                },
            })
            .collect();
        Self { entries }
    }
}

/// Rendered outcome of one prediction, precomputed for display.
#[derive(Clone, Debug)]
pub struct ResultState {
    /// Probability formatted to two decimals for the metric box.
    pub probability_text: String,
    pub headline: &'static str,
    pub positive: bool,
    pub advice_title: &'static str,
    pub advice_lines: &'static [&'static str],
    /// Advisory messages; empty for a negative prediction.
    pub advisories: Vec<&'static str>,
    /// Full importance ranking for the bar chart, sorted descending.
    pub ranked: Vec<RankedImportance>,
    /// Top slice of the ranking for the collapsible table.
    pub top: Vec<RankedImportance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_feature_kinds() {
        let stats = StatsTable::baked();
        let form = FormState::with_defaults(&stats);
        assert_eq!(form.entries.len(), FEATURES.len());

        let sleep_idx = FEATURES.iter().position(|f| f.name == "sleep").unwrap();
        assert_eq!(
            form.entries[sleep_idx],
            FormEntry::Number { value: 7.760957892 }
        );
        let gender_idx = FEATURES.iter().position(|f| f.name == "gender").unwrap();
        assert_eq!(form.entries[gender_idx], FormEntry::Number { value: 0.0 });
        let smoking_idx = FEATURES.iter().position(|f| f.name == "smoking").unwrap();
        assert_eq!(
            form.entries[smoking_idx],
            FormEntry::Choice {
                value: TriState::Unknown
            }
        );
    }
}
