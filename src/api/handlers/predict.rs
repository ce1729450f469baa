use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use serde::Serialize;

use crate::api::form::parse_application;
use crate::errors::AppError;
use crate::intelligence::RuleHit;
use crate::models::{DecisionSource, RiskLabel};
use crate::AppState;

/// Prediction response: the inputs as submitted plus the decision.
#[derive(Serialize)]
pub struct PredictionResponse {
    pub cibil: f64,
    pub fraud_info: i64,
    pub income_source: String,
    pub tax_paid: String,
    pub timely_paid: String,
    pub loan_amount: f64,
    pub loan_interest: f64,
    /// Probability as an integer percentage.
    pub prob: u8,
    pub probability: f64,
    pub label: RiskLabel,
    pub label_name: &'static str,
    pub source: DecisionSource,
    pub rules: Vec<RuleHit>,
}

/// POST /predict — score one applicant from form fields.
///
/// Fields are kept as ordered pairs so a repeated key resolves to its first
/// value.
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<PredictionResponse>, AppError> {
    let Form(fields) = form?;
    let submitted = parse_application(&fields);
    let assessment = state.engine.assess(&submitted.profile);
    let decision = assessment.decision;

    tracing::info!(
        prob = decision.percentage(),
        label = %decision.label(),
        source = %decision.source(),
        "Prediction served"
    );

    let profile = submitted.profile;
    Ok(Json(PredictionResponse {
        cibil: profile.credit_score,
        fraud_info: submitted.fraud_info,
        income_source: profile.income_source,
        tax_paid: submitted.tax_paid,
        timely_paid: submitted.timely_paid,
        loan_amount: profile.loan_amount,
        loan_interest: profile.loan_interest,
        prob: decision.percentage(),
        probability: decision.probability(),
        label: decision.label(),
        label_name: decision.label().as_str(),
        source: decision.source(),
        rules: assessment.hits,
    }))
}
