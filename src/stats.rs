//! Population statistics backing the feature normalizer.
//!
//! Most entries are literal constants carried over from the training
//! pipeline. A few (age, plus the modes of the yes/no questions) are derived
//! from the reference dataset when the process starts. The finished table is
//! immutable and shared by reference for the rest of the process.

use std::collections::BTreeMap;

use crate::stats::reference::{ReferenceDataset, ReferenceError};

pub mod reference;

/// Mean and standard deviation for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStats {
    pub mean: f64,
    pub std: f64,
}

/// Precomputed means and stds from the training pipeline.
///
/// For the yes/no questions the "mean" slot holds the dataset mode and the
/// std is never consulted.
const BAKED: [(&str, f64, f64); 16] = [
    ("alcohol_x", 5.453754451, 16.24982132),
    ("cholesterol", 181.5073331, 39.06219388),
    ("moderate_pa", 59.60793792, 737.6031039),
    ("vigorous_pa", 49.6231405, 687.960533),
    ("height", 66.41341194, 4.168204693),
    ("weight", 179.0332633, 47.35433188),
    ("calories", 1930.070135, 776.9697004),
    ("protein", 71.01640037, 33.45953841),
    ("carbs", 224.9348537, 99.22542613),
    ("sugar", 97.23631057, 58.52259581),
    ("fat", 80.24344171, 39.05626193),
    ("alcohol_y", 5.453754451, 16.24982132),
    ("insulin", 87.65179003, 148.704706),
    ("sleep", 7.760957892, 1.605230055),
    ("avg_drinks_day", 1.684867, 2.180017),
    ("physical_activity", 195.58988503671603, 1938.2701871451966),
];

/// Columns whose mode feeds the "unknown" answer of a yes/no question.
const MODE_COLUMNS: [&str; 4] = ["smoking", "liver", "heart", "income"];

/// Immutable mean/std lookup table for every normalized feature.
#[derive(Debug, Clone)]
pub struct StatsTable {
    entries: BTreeMap<&'static str, FeatureStats>,
}

impl StatsTable {
    /// Table containing only the baked-in constants.
    pub fn baked() -> Self {
        let entries = BAKED
            .iter()
            .map(|&(name, mean, std)| (name, FeatureStats { mean, std }))
            .collect();
        Self { entries }
    }

    /// Build the full table: baked constants plus the entries derived from
    /// the reference dataset (age mean/std and the four question modes).
    pub fn from_reference(dataset: &ReferenceDataset) -> Result<Self, ReferenceError> {
        let mut table = Self::baked();
        table.entries.insert(
            "age",
            FeatureStats {
                mean: dataset.mean("age")?,
                std: dataset.std("age")?,
            },
        );
        for column in MODE_COLUMNS {
            let mode = dataset.mode(column)?;
            table
                .entries
                .insert(column, FeatureStats { mean: mode, std: 1.0 });
        }
        Ok(table)
    }

    /// Look up stats for a feature name.
    ///
    /// An absent name falls back to mean 0.0 / std 1.0, which leaves the raw
    /// value effectively unnormalized; the degradation is logged but not
    /// surfaced to the user. A std of exactly zero is clamped to 1.0 so the
    /// normalizer can never divide by zero.
    pub fn lookup(&self, name: &str) -> FeatureStats {
        let Some(&stats) = self.entries.get(name) else {
            tracing::debug!(feature = name, "no stats entry; using mean 0.0, std 1.0");
            return FeatureStats { mean: 0.0, std: 1.0 };
        };
        if stats.std == 0.0 {
            return FeatureStats {
                mean: stats.mean,
                std: 1.0,
            };
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use super::*;

    #[test]
    fn baked_cholesterol_matches_training_constants() {
        let table = StatsTable::baked();
        let stats = table.lookup("cholesterol");
        assert_eq!(stats.mean, 181.5073331);
        assert_eq!(stats.std, 39.06219388);
    }

    #[test]
    fn unknown_name_falls_back_to_identity() {
        let table = StatsTable::baked();
        let stats = table.lookup("bmi");
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std, 1.0);
    }

    #[test]
    fn zero_std_is_clamped() {
        let mut table = StatsTable::baked();
        table
            .entries
            .insert("degenerate", FeatureStats { mean: 3.0, std: 0.0 });
        let stats = table.lookup("degenerate");
        assert_eq!(stats.std, 1.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn reference_fills_age_and_modes() {
        let csv = "age,smoking,liver,heart,income\n\
                   30,1,0,0,1\n\
                   40,1,0,1,1\n\
                   50,0,0,1,1\n";
        let dataset = ReferenceDataset::parse(BufReader::new(csv.as_bytes())).unwrap();
        let table = StatsTable::from_reference(&dataset).unwrap();

        let age = table.lookup("age");
        assert_eq!(age.mean, 40.0);
        assert_eq!(age.std, 10.0);
        assert_eq!(table.lookup("smoking").mean, 1.0);
        assert_eq!(table.lookup("liver").mean, 0.0);
        assert_eq!(table.lookup("heart").mean, 1.0);
        assert_eq!(table.lookup("income").mean, 1.0);
    }

    #[test]
    fn reference_missing_required_column_fails() {
        let dataset =
            ReferenceDataset::parse(BufReader::new("age,smoking\n40,1\n".as_bytes())).unwrap();
        assert!(StatsTable::from_reference(&dataset).is_err());
    }
}
