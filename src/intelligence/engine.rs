use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};

use super::heuristic::{self, RuleHit};
use super::model::{check_shape, ModelError, ModelResult, RiskModel};
use super::resolver::ModelAvailability;
use crate::models::{ApplicantProfile, DecisionSource, RiskDecision, RiskLabel};

/// Confidence substituted when a model classifies but cannot report a
/// probability. Not a calibrated estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceProxy {
    pub fraud: f64,
    pub no_fraud: f64,
}

impl Default for ConfidenceProxy {
    fn default() -> Self {
        Self {
            fraud: 0.9,
            no_fraud: 0.1,
        }
    }
}

impl ConfidenceProxy {
    pub fn for_label(&self, label: RiskLabel) -> f64 {
        match label {
            RiskLabel::Fraud => self.fraud,
            RiskLabel::NoFraud => self.no_fraud,
        }
    }
}

/// A decision together with the heuristic rules behind it (empty when the
/// external model decided).
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub decision: RiskDecision,
    pub hits: Vec<RuleHit>,
}

/// Per-request scorer. Holds only immutable state, so one instance is shared
/// across all requests.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    availability: ModelAvailability,
    proxy: ConfidenceProxy,
}

impl RiskEngine {
    pub fn new(availability: ModelAvailability, proxy: ConfidenceProxy) -> Self {
        Self {
            availability,
            proxy,
        }
    }

    /// Engine that never consults a model.
    pub fn heuristic_only() -> Self {
        Self::new(
            ModelAvailability::unavailable("model disabled"),
            ConfidenceProxy::default(),
        )
    }

    pub fn availability(&self) -> &ModelAvailability {
        &self.availability
    }

    pub fn proxy(&self) -> ConfidenceProxy {
        self.proxy
    }

    /// Ask the external model, if any, about one applicant.
    pub fn query_model(&self, profile: &ApplicantProfile) -> ModelResult {
        let Some(model) = self.availability.model() else {
            return ModelResult::Unavailable;
        };

        match invoke(model, &profile.model_features(), self.proxy) {
            Ok((label, probability)) => ModelResult::Ok { label, probability },
            Err(e) => ModelResult::Failed(e),
        }
    }

    /// Score one applicant, preferring the model and falling back to the
    /// heuristic on absence or failure. Never fails.
    pub fn assess(&self, profile: &ApplicantProfile) -> Assessment {
        let start = Instant::now();

        let assessment = match self.query_model(profile) {
            ModelResult::Ok { label, probability } => {
                tracing::debug!(%label, probability, "Model decision");
                Assessment {
                    decision: RiskDecision::from_probability(probability, DecisionSource::Model),
                    hits: Vec::new(),
                }
            }
            ModelResult::Unavailable => heuristic_assessment(profile),
            ModelResult::Failed(e) => {
                tracing::warn!(error = %e, "Model invocation failed, falling back to heuristic");
                counter!("model_fallbacks_total").increment(1);
                heuristic_assessment(profile)
            }
        };

        let decision = assessment.decision;
        counter!("risk_decisions_total", "source" => decision.source().as_str()).increment(1);
        if decision.label() == RiskLabel::Fraud {
            counter!("fraud_labels_total").increment(1);
        }
        histogram!("scoring_latency_seconds").record(start.elapsed().as_secs_f64());

        tracing::debug!(
            probability = decision.probability(),
            label = %decision.label(),
            source = %decision.source(),
            "Applicant scored"
        );

        assessment
    }

    pub fn score(&self, profile: &ApplicantProfile) -> RiskDecision {
        self.assess(profile).decision
    }
}

fn heuristic_assessment(profile: &ApplicantProfile) -> Assessment {
    let outcome = heuristic::evaluate(profile);
    Assessment {
        decision: outcome.decision,
        hits: outcome.hits,
    }
}

/// Classify, then try for a probability. A failed or unsupported probability
/// query falls back to the proxy; a failed classification fails the call.
fn invoke(
    model: &dyn RiskModel,
    features: &[f64],
    proxy: ConfidenceProxy,
) -> Result<(RiskLabel, f64), ModelError> {
    check_shape(model, features)?;

    let label = model.classify(features)?;

    let probability = match model.probability(features) {
        Ok(p) if p.is_finite() => p,
        Ok(p) => {
            tracing::debug!(probability = p, "Non-finite model probability, using proxy");
            proxy.for_label(label)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Model probability unavailable, using proxy");
            proxy.for_label(label)
        }
    };

    Ok((label, probability))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
