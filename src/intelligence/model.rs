use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RiskLabel;

/// Failure while invoking an external model for one applicant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("feature shape mismatch: model expects {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model does not support probability estimates")]
    ProbabilityUnsupported,

    #[error("model produced a non-finite output: {0}")]
    NonFinite(f64),

    #[error("model invocation failed: {0}")]
    Invocation(String),
}

/// Classify/probability contract of an external predictive model.
pub trait RiskModel: Send + Sync {
    /// Short identifier of the model family, e.g. "logistic".
    fn kind(&self) -> &'static str;

    /// Callers must pass exactly this many features; see [`check_shape`].
    fn expected_features(&self) -> usize;

    fn classify(&self, features: &[f64]) -> Result<RiskLabel, ModelError>;

    /// Probability of the fraud class. Models that only classify return
    /// [`ModelError::ProbabilityUnsupported`].
    fn probability(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// Outcome of asking the external model about one applicant.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResult {
    Ok { label: RiskLabel, probability: f64 },
    Unavailable,
    Failed(ModelError),
}

/// Reject feature vectors whose length differs from what the model expects.
pub fn check_shape(model: &dyn RiskModel, features: &[f64]) -> Result<(), ModelError> {
    let expected = model.expected_features();
    if features.len() != expected {
        return Err(ModelError::ShapeMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Artifact format
// ---------------------------------------------------------------------------

/// Serialized model artifact, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    Threshold(ThresholdModel),
}

impl ModelArtifact {
    /// Reject parameter sets that could never produce a usable score.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::Logistic(m) => {
                if m.weights.is_empty() {
                    return Err("logistic model has no weights".into());
                }
                if !m.weights.iter().all(|w| w.is_finite()) || !m.intercept.is_finite() {
                    return Err("logistic model has non-finite parameters".into());
                }
                if let Some(names) = &m.feature_names {
                    if names.len() != m.weights.len() {
                        return Err(format!(
                            "{} feature names for {} weights",
                            names.len(),
                            m.weights.len()
                        ));
                    }
                }
                Ok(())
            }
            ModelArtifact::Threshold(m) => {
                if m.feature_index >= m.expected_features {
                    return Err(format!(
                        "feature index {} out of range for {} features",
                        m.feature_index, m.expected_features
                    ));
                }
                if !m.threshold.is_finite() {
                    return Err("threshold is not finite".into());
                }
                Ok(())
            }
        }
    }

    pub fn into_model(self) -> Box<dyn RiskModel> {
        match self {
            ModelArtifact::Logistic(m) => Box::new(m),
            ModelArtifact::Threshold(m) => Box::new(m),
        }
    }
}

// ---------------------------------------------------------------------------
// Logistic regression
// ---------------------------------------------------------------------------

/// Linear model with a sigmoid link; supports probability estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    fn score(&self, features: &[f64]) -> Result<f64, ModelError> {
        let z = self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());

        if p.is_finite() {
            Ok(p)
        } else {
            Err(ModelError::NonFinite(p))
        }
    }
}

impl RiskModel for LogisticModel {
    fn kind(&self) -> &'static str {
        "logistic"
    }

    fn expected_features(&self) -> usize {
        self.weights.len()
    }

    fn classify(&self, features: &[f64]) -> Result<RiskLabel, ModelError> {
        self.score(features).map(RiskLabel::from_probability)
    }

    fn probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        self.score(features)
    }
}

// ---------------------------------------------------------------------------
// Single-feature threshold
// ---------------------------------------------------------------------------

/// Decision stump on one feature. Classification only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdModel {
    pub feature_index: usize,
    pub threshold: f64,
    pub expected_features: usize,
}

impl RiskModel for ThresholdModel {
    fn kind(&self) -> &'static str {
        "threshold"
    }

    fn expected_features(&self) -> usize {
        self.expected_features
    }

    fn classify(&self, features: &[f64]) -> Result<RiskLabel, ModelError> {
        let value = features
            .get(self.feature_index)
            .copied()
            .ok_or_else(|| ModelError::Invocation("feature index out of range".into()))?;
        if value.is_nan() {
            return Err(ModelError::NonFinite(value));
        }

        Ok(if value >= self.threshold {
            RiskLabel::Fraud
        } else {
            RiskLabel::NoFraud
        })
    }

    fn probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Err(ModelError::ProbabilityUnsupported)
    }
}
