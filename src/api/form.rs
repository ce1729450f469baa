use crate::models::{ApplicantProfile, YesNo};

/// A submitted application: the normalized profile used for scoring plus the
/// field values echoed back to the user as they were entered.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedApplication {
    pub profile: ApplicantProfile,
    /// Parsed `fraud_info`; only 1 sets the fraud flag.
    pub fraud_info: i64,
    pub tax_paid: String,
    pub timely_paid: String,
}

/// First value for `key`. Repeated keys keep their first occurrence.
fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Parse a numeric field, defaulting to 0 when absent, malformed or non-finite.
fn number(fields: &[(String, String)], key: &str) -> f64 {
    field(fields, key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Normalize raw form fields into a [`SubmittedApplication`].
///
/// | key             | default  |
/// |-----------------|----------|
/// | `cibil`         | 0        |
/// | `fraud_info`    | 0        |
/// | `income_source` | "Salary" |
/// | `tax_paid`      | "Yes"    |
/// | `timely_paid`   | "Yes"    |
/// | `loan_amount`   | 0        |
/// | `loan_interest` | 0        |
///
/// Never fails: anything unparseable takes its default.
pub fn parse_application(fields: &[(String, String)]) -> SubmittedApplication {
    let fraud_info = field(fields, "fraud_info")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let tax_paid = field(fields, "tax_paid").unwrap_or("Yes").to_string();
    let timely_paid = field(fields, "timely_paid").unwrap_or("Yes").to_string();

    let profile = ApplicantProfile {
        credit_score: number(fields, "cibil"),
        fraud_flag_present: fraud_info == 1,
        income_source: field(fields, "income_source").unwrap_or("Salary").to_string(),
        tax_paid: YesNo::from_form_str(&tax_paid),
        timely_repayment_history: YesNo::from_form_str(&timely_paid),
        loan_amount: number(fields, "loan_amount"),
        loan_interest: number(fields, "loan_interest"),
    };

    SubmittedApplication {
        profile,
        fraud_info,
        tax_paid,
        timely_paid,
    }
}
