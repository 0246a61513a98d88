//! Configuration types for the sprint planner.

use pyo3::prelude::*;

/// Tunable weighting policy used to turn confidence and credits into a priority weight.
///
/// `weight = credit * credit_multiplier + (6 - confidence) * confidence_multiplier`.
/// The default 2.0 vs 1.5 ratio biases time toward weak topics over merely important ones.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct WeightPolicy {
    /// Multiplier applied to the subject's credit weight
    #[pyo3(get, set)]
    pub credit_multiplier: f64,
    /// Multiplier applied to the inverted confidence score
    #[pyo3(get, set)]
    pub confidence_multiplier: f64,
    /// Confidence used when neither the topic nor its subject carries one (1-5)
    #[pyo3(get, set)]
    pub default_confidence: u8,
    /// Credit weight used when the subject does not carry one
    #[pyo3(get, set)]
    pub default_credit_weight: f64,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            credit_multiplier: 1.5,
            confidence_multiplier: 2.0,
            default_confidence: 3,
            default_credit_weight: 3.0,
        }
    }
}

#[pymethods]
impl WeightPolicy {
    #[new]
    #[pyo3(signature = (
        credit_multiplier=None,
        confidence_multiplier=None,
        default_confidence=None,
        default_credit_weight=None
    ))]
    fn new(
        credit_multiplier: Option<f64>,
        confidence_multiplier: Option<f64>,
        default_confidence: Option<u8>,
        default_credit_weight: Option<f64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            credit_multiplier: credit_multiplier.unwrap_or(defaults.credit_multiplier),
            confidence_multiplier: confidence_multiplier.unwrap_or(defaults.confidence_multiplier),
            default_confidence: default_confidence.unwrap_or(defaults.default_confidence),
            default_credit_weight: default_credit_weight.unwrap_or(defaults.default_credit_weight),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "WeightPolicy(credit_multiplier={}, confidence_multiplier={})",
            self.credit_multiplier, self.confidence_multiplier
        )
    }
}

/// Configuration for a planning run.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Weighting policy for hour budgets
    #[pyo3(get, set)]
    pub weight_policy: WeightPolicy,
    /// Topics at or below this effective confidence are marked High Focus
    #[pyo3(get, set)]
    pub high_focus_max_confidence: u8,
    /// Subjects at or above this credit weight are flagged as crucial
    #[pyo3(get, set)]
    pub crucial_min_credit_weight: f64,
    /// Verbosity level: 0=silent, 1=placements, 2=decisions, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            weight_policy: WeightPolicy::default(),
            high_focus_max_confidence: 2,
            crucial_min_credit_weight: 4.0,
            verbosity: 0,
        }
    }
}

impl PlannerConfig {
    /// Check the numeric policy knobs, returning a description of the first bad one.
    pub fn validate(&self) -> Result<(), String> {
        let policy = &self.weight_policy;
        for (name, value) in [
            ("credit_multiplier", policy.credit_multiplier),
            ("confidence_multiplier", policy.confidence_multiplier),
            ("default_credit_weight", policy.default_credit_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if !(1..=5).contains(&policy.default_confidence) {
            return Err(format!(
                "default_confidence must be between 1 and 5, got {}",
                policy.default_confidence
            ));
        }
        Ok(())
    }
}

#[pymethods]
impl PlannerConfig {
    #[new]
    #[pyo3(signature = (
        weight_policy=None,
        high_focus_max_confidence=None,
        crucial_min_credit_weight=None,
        verbosity=None
    ))]
    fn new(
        weight_policy: Option<WeightPolicy>,
        high_focus_max_confidence: Option<u8>,
        crucial_min_credit_weight: Option<f64>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            weight_policy: weight_policy.unwrap_or(defaults.weight_policy),
            high_focus_max_confidence: high_focus_max_confidence
                .unwrap_or(defaults.high_focus_max_confidence),
            crucial_min_credit_weight: crucial_min_credit_weight
                .unwrap_or(defaults.crucial_min_credit_weight),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlannerConfig(high_focus_max_confidence={}, crucial_min_credit_weight={}, verbosity={})",
            self.high_focus_max_confidence, self.crucial_min_credit_weight, self.verbosity
        )
    }
}
