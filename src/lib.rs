//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Artifact path configuration.
pub mod config;
/// Threshold decision, advisories, and importance ranking.
pub mod decision;
/// Shared egui UI modules.
pub mod egui_app;
/// Fixed feature table and raw input types.
pub mod features;
/// Logging setup.
pub mod logging;
/// Classifier and threshold artifacts.
pub mod model;
/// Raw value standardization.
pub mod normalize;
/// Prediction pipeline.
pub mod predict;
/// Population statistics table.
pub mod stats;
