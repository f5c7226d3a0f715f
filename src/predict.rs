//! Prediction pipeline: raw form inputs → normalized vector → classifier →
//! rendered decision.

use thiserror::Error;

use crate::config::AppConfig;
use crate::decision::{self, Advisory, RankedImportance, RiskLabel};
use crate::features::{FEATURES, RawValue};
use crate::model::{self, ModelError, RiskModel};
use crate::normalize::normalize;
use crate::stats::reference::{ReferenceDataset, ReferenceError};
use crate::stats::StatsTable;

/// Failures while loading the startup artifacts. All are fatal; the app
/// cannot serve predictions without them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error("model was trained with feature '{model}' where the form collects '{form}'")]
    FeatureOrderMismatch { model: String, form: String },
    #[error("model was trained with {model} features but the form collects {form}")]
    FeatureCountMismatch { model: usize, form: usize },
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("patient record has {got} values but the form defines {expected} features")]
    WrongFieldCount { got: usize, expected: usize },
}

/// One user's raw inputs, in form order. Created fresh per Predict click
/// and discarded after rendering.
#[derive(Debug, Clone)]
pub struct PatientRecord {
    values: Vec<RawValue>,
}

impl PatientRecord {
    /// Build a record from raw values ordered like [`FEATURES`].
    pub fn from_values(values: Vec<RawValue>) -> Result<Self, PredictError> {
        if values.len() != FEATURES.len() {
            return Err(PredictError::WrongFieldCount {
                got: values.len(),
                expected: FEATURES.len(),
            });
        }
        Ok(Self { values })
    }
}

/// Everything a prediction needs to render.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub probability: f64,
    pub label: RiskLabel,
    /// Lifestyle advisories; only populated for a positive label.
    pub advisories: Vec<Advisory>,
    /// Importances sorted descending, ties in training order.
    pub ranked_importances: Vec<RankedImportance>,
}

/// Owns the loaded classifier, threshold, and statistics table.
///
/// Loaded once at startup and immutable afterwards; every Predict click
/// runs synchronously against the same instance.
#[derive(Debug)]
pub struct Predictor {
    model: RiskModel,
    threshold: f64,
    stats: StatsTable,
}

impl Predictor {
    /// Assemble a predictor from already-loaded parts.
    pub fn new(model: RiskModel, threshold: f64, stats: StatsTable) -> Result<Self, LoadError> {
        if model.feature_names.len() != FEATURES.len() {
            return Err(LoadError::FeatureCountMismatch {
                model: model.feature_names.len(),
                form: FEATURES.len(),
            });
        }
        for (name, spec) in model.feature_names.iter().zip(&FEATURES) {
            if name != spec.name {
                return Err(LoadError::FeatureOrderMismatch {
                    model: name.clone(),
                    form: spec.name.to_string(),
                });
            }
        }
        Ok(Self {
            model,
            threshold,
            stats,
        })
    }

    /// Load all startup artifacts named by the config.
    pub fn load(config: &AppConfig) -> Result<Self, LoadError> {
        let model = RiskModel::load_json(&config.model_path)?;
        let threshold = model::load_threshold(&config.threshold_path)?;
        let dataset = ReferenceDataset::load(&config.reference_data_path)?;
        let stats = StatsTable::from_reference(&dataset)?;
        Self::new(model, threshold, stats)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }

    /// Run one synchronous prediction for a patient record.
    pub fn predict(&self, patient: &PatientRecord) -> Result<Prediction, PredictError> {
        if patient.values.len() != FEATURES.len() {
            return Err(PredictError::WrongFieldCount {
                got: patient.values.len(),
                expected: FEATURES.len(),
            });
        }
        let normalized: Vec<f64> = FEATURES
            .iter()
            .zip(&patient.values)
            .map(|(spec, &raw)| normalize(spec, raw, &self.stats))
            .collect();

        let probability = self.model.predict_probability(&normalized)?;
        let label = decision::decide(probability, self.threshold);

        let advisories = if label == RiskLabel::LikelyDiabetic {
            let sleep_idx = feature_index("sleep");
            let activity_idx = feature_index("physical_activity");
            decision::advisories(&self.stats, normalized[sleep_idx], normalized[activity_idx])
        } else {
            Vec::new()
        };

        let ranked_importances = decision::rank_importances(
            &self.model.feature_names,
            self.model.feature_importances(),
        );

        tracing::debug!(probability, ?label, "prediction complete");
        Ok(Prediction {
            probability,
            label,
            advisories,
            ranked_importances,
        })
    }
}

fn feature_index(name: &str) -> usize {
    FEATURES
        .iter()
        .position(|f| f.name == name)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TriState;
    use crate::model::{Tree, TreeNode};

    fn leaf(value: f64) -> TreeNode {
        TreeNode {
            feature_index: 0,
            threshold: 0.0,
            left: 0,
            right: 0,
            leaf_value: value,
            is_leaf: true,
        }
    }

    fn constant_model(probability: f64) -> RiskModel {
        RiskModel {
            model_version: 1,
            feature_names: FEATURES.iter().map(|f| f.name.to_string()).collect(),
            feature_importances: (0..FEATURES.len()).map(|i| i as f64 * 0.01).collect(),
            trees: vec![Tree {
                nodes: vec![leaf(probability)],
            }],
        }
    }

    fn mean_record(stats: &StatsTable) -> PatientRecord {
        let values = FEATURES
            .iter()
            .map(|spec| match spec.kind {
                crate::features::FeatureKind::TriState => RawValue::Choice(TriState::No),
                crate::features::FeatureKind::Gender => RawValue::Number(0.0),
                crate::features::FeatureKind::Continuous => {
                    RawValue::Number(stats.lookup(spec.name).mean)
                }
            })
            .collect();
        PatientRecord::from_values(values).unwrap()
    }

    #[test]
    fn positive_at_exact_threshold() {
        let stats = StatsTable::baked();
        let predictor = Predictor::new(constant_model(0.50), 0.50, stats).unwrap();
        let record = mean_record(predictor.stats());
        let prediction = predictor.predict(&record).unwrap();
        assert_eq!(prediction.probability, 0.50);
        assert_eq!(prediction.label, RiskLabel::LikelyDiabetic);
    }

    #[test]
    fn negative_prediction_has_no_advisories() {
        let stats = StatsTable::baked();
        let predictor = Predictor::new(constant_model(0.10), 0.50, stats).unwrap();
        let record = mean_record(predictor.stats());
        let prediction = predictor.predict(&record).unwrap();
        assert_eq!(prediction.label, RiskLabel::LikelyNotDiabetic);
        assert!(prediction.advisories.is_empty());
    }

    #[test]
    fn mean_inputs_trigger_sleep_advisory_when_positive() {
        // Mean sleep (7.76h) normalizes to 0, below the "7 hours" cutoff
        // only when 7 > mean; here the cutoff is negative so no advisory.
        // Entering 6 hours normalizes below the cutoff and fires it.
        let stats = StatsTable::baked();
        let predictor = Predictor::new(constant_model(0.90), 0.50, stats).unwrap();

        let mut values: Vec<RawValue> = FEATURES
            .iter()
            .map(|spec| match spec.kind {
                crate::features::FeatureKind::TriState => RawValue::Choice(TriState::No),
                _ => RawValue::Number(predictor.stats().lookup(spec.name).mean),
            })
            .collect();
        let sleep_idx = FEATURES.iter().position(|f| f.name == "sleep").unwrap();
        values[sleep_idx] = RawValue::Number(6.0);
        let record = PatientRecord::from_values(values).unwrap();

        let prediction = predictor.predict(&record).unwrap();
        assert!(prediction
            .advisories
            .contains(&Advisory::SleepInsufficiency));
    }

    #[test]
    fn ranked_importances_cover_all_features() {
        let stats = StatsTable::baked();
        let predictor = Predictor::new(constant_model(0.50), 0.50, stats).unwrap();
        let record = mean_record(predictor.stats());
        let prediction = predictor.predict(&record).unwrap();
        assert_eq!(prediction.ranked_importances.len(), FEATURES.len());
        // Highest synthetic importance belongs to the last feature.
        assert_eq!(
            prediction.ranked_importances[0].feature,
            "physical_activity"
        );
    }

    #[test]
    fn reordered_model_features_are_rejected() {
        let mut model = constant_model(0.5);
        model.feature_names.swap(0, 1);
        let err = Predictor::new(model, 0.5, StatsTable::baked()).unwrap_err();
        assert!(matches!(err, LoadError::FeatureOrderMismatch { .. }));
    }

    #[test]
    fn short_record_is_rejected() {
        let err = PatientRecord::from_values(vec![RawValue::Number(0.0)]).unwrap_err();
        assert!(matches!(err, PredictError::WrongFieldCount { got: 1, .. }));
    }
}
