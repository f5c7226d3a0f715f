//! Fixed feature table shared by the form, the normalizer, and the model.
//!
//! The order of [`FEATURES`] is the order the classifier was trained with.
//! Reordering or omitting an entry silently corrupts predictions, so every
//! consumer iterates this table instead of keeping its own list.

/// How a feature is entered and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Numeric entry; `-1` is the "I don't know" sentinel.
    Continuous,
    /// Unknown / No / Yes select box.
    TriState,
    /// 0/1 slider passed through without normalization.
    Gender,
}

/// One named scalar attribute collected from the user.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    /// Stable name used for statistics lookup and artifact validation.
    pub name: &'static str,
    /// Human-friendly form label.
    pub label: &'static str,
    pub kind: FeatureKind,
}

/// Ordered feature set expected by the trained model.
pub const FEATURES: [FeatureSpec; 18] = [
    FeatureSpec {
        name: "cholesterol",
        label: "Cholesterol (mg/dL)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "income",
        label: "Do you have +20k in savings?",
        kind: FeatureKind::TriState,
    },
    FeatureSpec {
        name: "insulin",
        label: "Insulin (μU/mL)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "smoking",
        label: "Have you smoked more that 100 cigarettes in your life?",
        kind: FeatureKind::TriState,
    },
    FeatureSpec {
        name: "calories",
        label: "Daily Calorie Intake (kcal)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "protein",
        label: "Protein (g/day)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "carbs",
        label: "Carbohydrates (g/day)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "sugar",
        label: "Sugar (g/day)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "fat",
        label: "Fat (g/day)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "height",
        label: "Height (cm)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "weight",
        label: "Weight (kg)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "gender",
        label: "Gender (0 = Male, 1 = Female)",
        kind: FeatureKind::Gender,
    },
    FeatureSpec {
        name: "age",
        label: "Age (years)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "liver",
        label: "Have you had a liver condition?",
        kind: FeatureKind::TriState,
    },
    FeatureSpec {
        name: "heart",
        label: "Have you had a heart condition?",
        kind: FeatureKind::TriState,
    },
    FeatureSpec {
        name: "sleep",
        label: "Sleep Duration (hours/night)",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "avg_drinks_day",
        label: "Average Drinks per Day",
        kind: FeatureKind::Continuous,
    },
    FeatureSpec {
        name: "physical_activity",
        label: "Physical Activity (minutes/week)",
        kind: FeatureKind::Continuous,
    },
];

/// Answer to a yes/no question where "I don't know" is a valid choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    #[default]
    Unknown,
    No,
    Yes,
}

impl TriState {
    /// Choices in the order the select box lists them.
    pub const ALL: [TriState; 3] = [TriState::Unknown, TriState::No, TriState::Yes];

    /// Label shown in the select box.
    pub fn label(self) -> &'static str {
        match self {
            TriState::Unknown => "I don't know",
            TriState::No => "No",
            TriState::Yes => "Yes",
        }
    }
}

/// Raw user input for one feature, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    /// Numeric entry, including the 0/1 gender slider.
    Number(f64),
    /// Tri-state select answer.
    Choice(TriState),
}

/// Look up a feature spec by name.
pub fn spec(name: &str) -> Option<&'static FeatureSpec> {
    FEATURES.iter().find(|f| f.name == name)
}
