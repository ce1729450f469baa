use serde::Serialize;
use std::fmt;

use crate::models::{ApplicantProfile, DecisionSource, RiskDecision, YesNo};

/// Loan amount above which a loan counts as large.
const LARGE_LOAN_AMOUNT: f64 = 300_000.0;
/// Credit score below which credit is considered poor.
const POOR_CREDIT_SCORE: f64 = 600.0;
/// Credit score below which credit is considered fair.
const FAIR_CREDIT_SCORE: f64 = 700.0;

/// A single heuristic rule that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleHit {
    FraudFlag,
    PoorCredit,
    FairCredit,
    LargeLoan,
    LargeLoanLateRepayment,
    TaxNotPaid,
    UnrecognizedIncome,
}

impl RuleHit {
    pub fn weight(&self) -> f64 {
        match self {
            RuleHit::FraudFlag => 0.60,
            RuleHit::PoorCredit => 0.25,
            RuleHit::FairCredit => 0.10,
            RuleHit::LargeLoan => 0.15,
            RuleHit::LargeLoanLateRepayment => 0.20,
            RuleHit::TaxNotPaid => 0.08,
            RuleHit::UnrecognizedIncome => 0.05,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleHit::FraudFlag => "fraud_flag",
            RuleHit::PoorCredit => "poor_credit",
            RuleHit::FairCredit => "fair_credit",
            RuleHit::LargeLoan => "large_loan",
            RuleHit::LargeLoanLateRepayment => "large_loan_late_repayment",
            RuleHit::TaxNotPaid => "tax_not_paid",
            RuleHit::UnrecognizedIncome => "unrecognized_income",
        }
    }
}

impl fmt::Display for RuleHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic output: the decision plus the rules that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicOutcome {
    pub decision: RiskDecision,
    pub hits: Vec<RuleHit>,
}

/// Collect every rule that fires for a profile.
///
/// Rules are independent and additive, except that the two credit bands are
/// exclusive and the late-repayment surcharge only applies to large loans.
pub fn fired_rules(profile: &ApplicantProfile) -> Vec<RuleHit> {
    let mut hits = Vec::new();

    if profile.fraud_flag_present {
        hits.push(RuleHit::FraudFlag);
    }

    if profile.credit_score < POOR_CREDIT_SCORE {
        hits.push(RuleHit::PoorCredit);
    } else if profile.credit_score < FAIR_CREDIT_SCORE {
        hits.push(RuleHit::FairCredit);
    }

    if profile.loan_amount > LARGE_LOAN_AMOUNT {
        hits.push(RuleHit::LargeLoan);
        if profile.timely_repayment_history == YesNo::No {
            hits.push(RuleHit::LargeLoanLateRepayment);
        }
    }

    if profile.tax_paid == YesNo::No {
        hits.push(RuleHit::TaxNotPaid);
    }

    if !profile.has_recognized_income() {
        hits.push(RuleHit::UnrecognizedIncome);
    }

    hits
}

/// Score a profile with the fixed rule set. Never fails.
pub fn evaluate(profile: &ApplicantProfile) -> HeuristicOutcome {
    let hits = fired_rules(profile);
    let score: f64 = hits.iter().map(RuleHit::weight).sum();

    HeuristicOutcome {
        decision: RiskDecision::from_probability(score.min(1.0), DecisionSource::Heuristic),
        hits,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
