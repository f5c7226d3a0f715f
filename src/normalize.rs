//! Converts raw form inputs into the standardized values the model expects.

use crate::features::{FeatureKind, FeatureSpec, RawValue, TriState};
use crate::stats::StatsTable;

/// Numeric sentinel meaning "I don't know".
pub const UNKNOWN_SENTINEL: f64 = -1.0;

/// Standardize one raw value for the model.
///
/// Continuous values get the usual z-score, except the `-1` sentinel which
/// substitutes `mean / std`. The training pipeline fed exactly that ratio
/// for unknowns (not 0, the standardized mean), so the same value is kept
/// here to reproduce its predictions bit for bit. Gender is passed through
/// untouched, and an unknown yes/no answer feeds the raw dataset mode into
/// the model without standardization.
pub fn normalize(spec: &FeatureSpec, raw: RawValue, stats: &StatsTable) -> f64 {
    match (spec.kind, raw) {
        (FeatureKind::Gender, RawValue::Number(value)) => value,
        (FeatureKind::Continuous, RawValue::Number(value)) => {
            let s = stats.lookup(spec.name);
            if value == UNKNOWN_SENTINEL {
                s.mean / s.std
            } else {
                (value - s.mean) / s.std
            }
        }
        (_, RawValue::Choice(choice)) => match choice {
            TriState::Yes => 1.0,
            TriState::No => 0.0,
            TriState::Unknown => stats.lookup(spec.name).mean,
        },
        // A numeric answer to a yes/no question can only come from a wiring
        // bug in the form; it is already in model units, pass it through.
        (FeatureKind::TriState, RawValue::Number(value)) => value,
    }
}
