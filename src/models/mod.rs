pub mod applicant;
pub mod decision;

pub use applicant::{ApplicantProfile, YesNo};
pub use decision::{DecisionSource, RiskDecision, RiskLabel, FRAUD_THRESHOLD};
