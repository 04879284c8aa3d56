//! Credit risk assessment: intake validation, model scoring, and risk messaging.
//!
//! A submission is validated by the [`IntakeGuard`], scored exactly once by a [`RiskModel`], and
//! its default probability is bucketed by a [`ThresholdTable`] into a [`RiskTier`].

pub mod batch;
pub mod domain;
pub mod intake;
pub mod messaging;
pub mod model;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{score_csv, BatchError, BatchSummary};
pub use domain::{
    loan_to_income_ratio, ApplicantProfile, ApplicantSubmission, AssessmentReport, CreditRating,
    LoanPurpose, LoanType, ResidenceType, RiskAssessment, UnknownCategory,
};
pub use intake::{IntakeGuard, IntakePolicy, IntakeViolation};
pub use messaging::{RiskTier, ThresholdTable, UnknownThresholdTable};
pub use model::{
    Feature, FeatureWeight, LogisticScorecard, ModelError, RatingBand, RiskModel, ScaleRange,
    ScoreRange, ScorecardConfig,
};
pub use router::assessment_router;
pub use service::{AssessmentError, AssessmentService};
