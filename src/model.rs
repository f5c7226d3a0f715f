//! Pretrained random-forest classifier and decision-threshold artifacts.
//!
//! Both artifacts are JSON files produced by the training pipeline and are
//! loaded exactly once at startup. Inference is read-only; the loaded model
//! is shared by reference for the process lifetime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read artifact {path}: {source}")]
    ReadArtifact {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    ParseArtifact {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("model has no features")]
    NoFeatures,
    #[error("model has {importances} importances but {features} features")]
    ImportanceLengthMismatch { importances: usize, features: usize },
    #[error("model has no trees")]
    NoTrees,
    #[error("tree {tree} is empty")]
    EmptyTree { tree: usize },
    #[error("tree {tree} node {node} points at a child outside the tree")]
    ChildOutOfRange { tree: usize, node: usize },
    #[error("tree {tree} node {node} splits on a feature the model does not have")]
    SplitFeatureOutOfRange { tree: usize, node: usize },
    #[error("tree {tree} node {node} has leaf probability {value} outside [0, 1]")]
    BadLeafProbability { tree: usize, node: usize, value: f64 },
    #[error("feature vector has {got} values but the model was trained with {expected}")]
    FeatureLengthMismatch { got: usize, expected: usize },
    #[error("threshold artifact value {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),
}

/// One node in a flat tree layout. Children always point forward in the
/// node array, so a walk from node 0 is guaranteed to terminate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Index into the model's feature order; unused on leaves.
    pub feature_index: u16,
    /// Split threshold in standardized feature units.
    pub threshold: f64,
    /// Child for `feature <= threshold`.
    pub left: u32,
    /// Child for `feature > threshold`.
    pub right: u32,
    /// Positive-class probability at this node; consulted only on leaves.
    pub leaf_value: f64,
    pub is_leaf: bool,
}

/// A single decision tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for a feature vector and return the leaf probability.
    fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf {
                return node.leaf_value;
            }
            let value = features
                .get(node.feature_index as usize)
                .copied()
                .unwrap_or(0.0);
            idx = if value <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

/// Pretrained binary random-forest classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskModel {
    /// Artifact format version.
    pub model_version: i64,
    /// Feature names in training order; input vectors must match.
    pub feature_names: Vec<String>,
    /// Per-feature importance scores, same length and order as the names.
    pub feature_importances: Vec<f64>,
    pub trees: Vec<Tree>,
}

impl RiskModel {
    /// Load and validate a model from a JSON artifact.
    pub fn load_json(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::ReadArtifact {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self =
            serde_json::from_slice(&bytes).map_err(|source| ModelError::ParseArtifact {
                path: path.to_path_buf(),
                source,
            })?;
        model.validate()?;
        tracing::info!(
            features = model.feature_names.len(),
            trees = model.trees.len(),
            "loaded risk model from {}",
            path.display()
        );
        Ok(model)
    }

    /// Validate structural invariants of the artifact.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.feature_names.is_empty() {
            return Err(ModelError::NoFeatures);
        }
        if self.feature_importances.len() != self.feature_names.len() {
            return Err(ModelError::ImportanceLengthMismatch {
                importances: self.feature_importances.len(),
                features: self.feature_names.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::NoTrees);
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::EmptyTree { tree: tree_idx });
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                if node.is_leaf {
                    if !(0.0..=1.0).contains(&node.leaf_value) {
                        return Err(ModelError::BadLeafProbability {
                            tree: tree_idx,
                            node: node_idx,
                            value: node.leaf_value,
                        });
                    }
                    continue;
                }
                let left = node.left as usize;
                let right = node.right as usize;
                // Forward-only children keep the walk finite.
                if left <= node_idx
                    || right <= node_idx
                    || left >= tree.nodes.len()
                    || right >= tree.nodes.len()
                {
                    return Err(ModelError::ChildOutOfRange {
                        tree: tree_idx,
                        node: node_idx,
                    });
                }
                if node.feature_index as usize >= self.feature_names.len() {
                    return Err(ModelError::SplitFeatureOutOfRange {
                        tree: tree_idx,
                        node: node_idx,
                    });
                }
            }
        }
        Ok(())
    }

    /// Probability of the positive (diabetic) class for an ordered feature
    /// vector. Errors if the vector does not match the training layout.
    pub fn predict_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.feature_names.len() {
            return Err(ModelError::FeatureLengthMismatch {
                got: features.len(),
                expected: self.feature_names.len(),
            });
        }
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    /// Display-only importance scores, in training feature order.
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdFile {
    best_threshold: f64,
}

/// Load the decision threshold from its JSON artifact.
pub fn load_threshold(path: &Path) -> Result<f64, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::ReadArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ThresholdFile =
        serde_json::from_slice(&bytes).map_err(|source| ModelError::ParseArtifact {
            path: path.to_path_buf(),
            source,
        })?;
    if !file.best_threshold.is_finite() || !(0.0..=1.0).contains(&file.best_threshold) {
        return Err(ModelError::ThresholdOutOfRange(file.best_threshold));
    }
    tracing::info!(threshold = file.best_threshold, "loaded decision threshold");
    Ok(file.best_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn split(feature: u16, threshold: f64, left: u32, right: u32) -> TreeNode {
        TreeNode {
            feature_index: feature,
            threshold,
            left,
            right,
            leaf_value: 0.0,
            is_leaf: false,
        }
    }

    fn two_tree_model() -> RiskModel {
        RiskModel {
            model_version: 1,
            feature_names: vec!["a".into(), "b".into()],
            feature_importances: vec![0.7, 0.3],
            trees: vec![
                Tree {
                    nodes: vec![split(0, 0.5, 1, 2), leaf(0.2), leaf(0.8)],
                },
                Tree {
                    nodes: vec![leaf(0.6)],
                },
            ],
        }
    }

    #[test]
    fn forest_averages_leaf_probabilities() {
        let model = two_tree_model();
        assert!(model.validate().is_ok());
        let p = model.predict_probability(&[0.0, 0.0]).unwrap();
        assert!((p - 0.4).abs() < 1e-12);
        let p = model.predict_probability(&[1.0, 0.0]).unwrap();
        assert!((p - 0.7).abs() < 1e-12);
    }

    #[test]
    fn wrong_vector_length_is_rejected() {
        let model = two_tree_model();
        let err = model.predict_probability(&[0.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureLengthMismatch { got: 1, expected: 2 }
        ));
    }

    #[test]
    fn validate_rejects_backward_children() {
        let mut model = two_tree_model();
        model.trees[0].nodes[0].left = 0;
        assert!(matches!(
            model.validate(),
            Err(ModelError::ChildOutOfRange { tree: 0, node: 0 })
        ));
    }

    #[test]
    fn validate_rejects_leaf_outside_unit_interval() {
        let mut model = two_tree_model();
        model.trees[1].nodes[0].leaf_value = 1.5;
        assert!(matches!(
            model.validate(),
            Err(ModelError::BadLeafProbability { tree: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_importance_mismatch() {
        let mut model = two_tree_model();
        model.feature_importances.pop();
        assert!(matches!(
            model.validate(),
            Err(ModelError::ImportanceLengthMismatch { .. })
        ));
    }

    #[test]
    fn load_json_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best_rf.json");
        let json = serde_json::to_vec(&two_tree_model()).unwrap();
        std::fs::write(&path, json).unwrap();
        let model = RiskModel::load_json(&path).unwrap();
        assert_eq!(model.feature_names, ["a", "b"]);
    }

    #[test]
    fn threshold_artifact_is_range_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threshold.json");
        std::fs::write(&path, br#"{"best_threshold": 0.42}"#).unwrap();
        assert_eq!(load_threshold(&path).unwrap(), 0.42);

        std::fs::write(&path, br#"{"best_threshold": 1.7}"#).unwrap();
        assert!(matches!(
            load_threshold(&path),
            Err(ModelError::ThresholdOutOfRange(_))
        ));
    }
}
