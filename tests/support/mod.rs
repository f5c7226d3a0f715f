//! Helpers for writing startup artifacts into a temp directory.

use std::path::Path;

use glycorisk::config::AppConfig;
use glycorisk::features::FEATURES;
use glycorisk::model::{RiskModel, Tree, TreeNode};

pub fn leaf(value: f64) -> TreeNode {
    TreeNode {
        feature_index: 0,
        threshold: 0.0,
        left: 0,
        right: 0,
        leaf_value: value,
        is_leaf: true,
    }
}

pub fn split(feature: u16, threshold: f64, left: u32, right: u32) -> TreeNode {
    TreeNode {
        feature_index: feature,
        threshold,
        left,
        right,
        leaf_value: 0.0,
        is_leaf: false,
    }
}

/// A forest with one split tree: high probability when the given feature's
/// standardized value exceeds `threshold`, low otherwise.
pub fn step_model(feature: u16, threshold: f64) -> RiskModel {
    RiskModel {
        model_version: 1,
        feature_names: FEATURES.iter().map(|f| f.name.to_string()).collect(),
        feature_importances: (0..FEATURES.len())
            .map(|i| if i as u16 == feature { 0.5 } else { 0.02 })
            .collect(),
        trees: vec![Tree {
            nodes: vec![split(feature, threshold, 1, 2), leaf(0.2), leaf(0.9)],
        }],
    }
}

/// Write model, threshold, and reference artifacts; return a config
/// pointing at them.
pub fn write_artifacts(dir: &Path, model: &RiskModel, threshold: f64) -> AppConfig {
    let model_path = dir.join("best_rf.json");
    std::fs::write(&model_path, serde_json::to_vec_pretty(model).unwrap()).unwrap();

    let threshold_path = dir.join("threshold.json");
    std::fs::write(
        &threshold_path,
        format!("{{\"best_threshold\": {threshold}}}"),
    )
    .unwrap();

    let reference_path = dir.join("health_reference.csv");
    std::fs::write(
        &reference_path,
        "age,smoking,liver,heart,income\n\
         32,1,0,0,1\n\
         41,1,0,1,1\n\
         47,0,0,0,0\n\
         56,1,1,0,1\n",
    )
    .unwrap();

    AppConfig {
        model_path,
        threshold_path,
        reference_data_path: reference_path,
    }
}
