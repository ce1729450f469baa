use serde::{Serialize, Serializer};
use std::fmt;

/// Probability at or above which an applicant is labelled fraudulent.
pub const FRAUD_THRESHOLD: f64 = 0.5;

// ---------------------------------------------------------------------------
// RiskLabel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    NoFraud,
    Fraud,
}

impl RiskLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= FRAUD_THRESHOLD {
            RiskLabel::Fraud
        } else {
            RiskLabel::NoFraud
        }
    }

    /// Integer class as rendered to the form (0 = no fraud, 1 = fraud).
    pub fn as_class(&self) -> u8 {
        match self {
            RiskLabel::NoFraud => 0,
            RiskLabel::Fraud => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::NoFraud => "no_fraud",
            RiskLabel::Fraud => "fraud",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RiskLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_class())
    }
}

// ---------------------------------------------------------------------------
// DecisionSource
// ---------------------------------------------------------------------------

/// Which path produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    Model,
    Heuristic,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Model => "model",
            DecisionSource::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskDecision
// ---------------------------------------------------------------------------

/// The `(probability, label)` pair returned for one applicant.
///
/// Only constructible through [`RiskDecision::from_probability`], so the label
/// always agrees with the clamped probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskDecision {
    probability: f64,
    label: RiskLabel,
    source: DecisionSource,
}

impl RiskDecision {
    /// Clamp into [0, 1] and derive the label. NaN is treated as zero risk.
    pub fn from_probability(probability: f64, source: DecisionSource) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };

        Self {
            probability,
            label: RiskLabel::from_probability(probability),
            source,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn label(&self) -> RiskLabel {
        self.label
    }

    pub fn source(&self) -> DecisionSource {
        self.source
    }

    /// Probability as an integer percentage, rounding halves to even.
    pub fn percentage(&self) -> u8 {
        (self.probability * 100.0).round_ties_even() as u8
    }
}
