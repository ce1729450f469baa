use serde::{Deserialize, Serialize};
use std::fmt;

/// Income sources the heuristic treats as low risk.
const RECOGNIZED_INCOME_SOURCES: &[&str] = &["salary", "investments"];

// ---------------------------------------------------------------------------
// YesNo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Only a literal "No" is negative; anything else reads as "Yes".
    pub fn from_form_str(s: &str) -> Self {
        if s == "No" {
            YesNo::No
        } else {
            YesNo::Yes
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApplicantProfile
// ---------------------------------------------------------------------------

/// Normalized applicant attributes, one per scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// CIBIL credit score. Values below the usual floor are poor credit, not errors.
    pub credit_score: f64,
    /// Prior fraud indicator.
    pub fraud_flag_present: bool,
    pub income_source: String,
    pub tax_paid: YesNo,
    pub timely_repayment_history: YesNo,
    pub loan_amount: f64,
    /// Only consumed by the external model.
    pub loan_interest: f64,
}

impl ApplicantProfile {
    pub fn has_recognized_income(&self) -> bool {
        let source = self.income_source.to_lowercase();
        RECOGNIZED_INCOME_SOURCES.contains(&source.as_str())
    }

    /// Feature vector in the order external models are trained on:
    /// credit score, fraud flag, loan amount, loan interest.
    pub fn model_features(&self) -> [f64; 4] {
        [
            self.credit_score,
            if self.fraud_flag_present { 1.0 } else { 0.0 },
            self.loan_amount,
            self.loan_interest,
        ]
    }
}

impl Default for ApplicantProfile {
    fn default() -> Self {
        Self {
            credit_score: 0.0,
            fraud_flag_present: false,
            income_source: "Salary".into(),
            tax_paid: YesNo::Yes,
            timely_repayment_history: YesNo::Yes,
            loan_amount: 0.0,
            loan_interest: 0.0,
        }
    }
}
