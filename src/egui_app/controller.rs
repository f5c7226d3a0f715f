//! Bridges the prediction pipeline to the egui renderer.

use crate::decision::{self, RiskLabel};
use crate::egui_app::state::{FormEntry, ResultState, StatusState, UiState};
use crate::features::RawValue;
use crate::predict::{PatientRecord, Predictor};

/// Number of features shown in the collapsible ranking table.
const TOP_FEATURES: usize = 5;

/// Maintains app state and runs predictions on behalf of the renderer.
pub struct EguiController {
    pub ui: UiState,
    predictor: Predictor,
}

impl EguiController {
    pub fn new(predictor: Predictor) -> Self {
        let ui = UiState::new(predictor.stats());
        Self { ui, predictor }
    }

    /// Reset every form field to its default value.
    pub fn reset_form(&mut self) {
        self.ui.form = crate::egui_app::state::FormState::with_defaults(self.predictor.stats());
        self.ui.result = None;
        self.ui.status = StatusState::idle();
    }

    /// Run one synchronous prediction from the current form contents.
    ///
    /// Failures clear the previous result and surface in the status line;
    /// the user corrects input and presses Predict again.
    pub fn predict(&mut self) {
        let values: Vec<RawValue> = self
            .ui
            .form
            .entries
            .iter()
            .map(|entry| match *entry {
                FormEntry::Number { value } => RawValue::Number(value),
                FormEntry::Choice { value } => RawValue::Choice(value),
            })
            .collect();

        let record = match PatientRecord::from_values(values) {
            Ok(record) => record,
            Err(err) => {
                self.fail(err.to_string());
                return;
            }
        };
        match self.predictor.predict(&record) {
            Ok(prediction) => {
                let positive = prediction.label == RiskLabel::LikelyDiabetic;
                let top = decision::top(&prediction.ranked_importances, TOP_FEATURES).to_vec();
                self.ui.result = Some(ResultState {
                    probability_text: format!("{:.2}", prediction.probability),
                    headline: prediction.label.headline(),
                    positive,
                    advice_title: if positive {
                        decision::POSITIVE_ADVICE_TITLE
                    } else {
                        decision::NEGATIVE_ADVICE_TITLE
                    },
                    advice_lines: if positive {
                        &decision::POSITIVE_ADVICE
                    } else {
                        &decision::NEGATIVE_ADVICE
                    },
                    advisories: prediction
                        .advisories
                        .iter()
                        .map(|advisory| advisory.message())
                        .collect(),
                    ranked: prediction.ranked_importances,
                    top,
                });
                self.ui.status = StatusState::info(format!(
                    "Prediction complete (threshold {:.2})",
                    self.predictor.threshold()
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction failed");
                self.fail(format!("Prediction failed: {err}"));
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.ui.result = None;
        self.ui.status = StatusState::error(message);
    }
}
