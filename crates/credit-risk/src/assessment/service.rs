use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{ApplicantSubmission, AssessmentReport, RiskAssessment};
use super::intake::{IntakeGuard, IntakePolicy, IntakeViolation};
use super::messaging::ThresholdTable;
use super::model::{ModelError, RiskModel};

/// Service composing the intake guard, the scoring model, and the threshold table.
pub struct AssessmentService<M> {
    guard: IntakeGuard,
    model: Arc<M>,
    thresholds: ThresholdTable,
}

impl<M> AssessmentService<M>
where
    M: RiskModel + 'static,
{
    pub fn new(model: Arc<M>, policy: IntakePolicy, thresholds: ThresholdTable) -> Self {
        Self {
            guard: IntakeGuard::with_policy(policy),
            model,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> ThresholdTable {
        self.thresholds
    }

    pub fn policy(&self) -> &IntakePolicy {
        self.guard.policy()
    }

    /// Validate a submission, score it once, and bucket the resulting probability.
    pub fn assess(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<AssessmentReport, AssessmentError> {
        let profile = match self.guard.profile_from_submission(submission) {
            Ok(profile) => profile,
            Err(violation) => {
                warn!(%violation, "submission rejected at intake");
                return Err(violation.into());
            }
        };

        let loan_to_income_ratio = profile.loan_to_income_ratio();
        let assessment = self.model.predict(&profile)?;
        check_probability(&assessment)?;

        let risk_tier = self.thresholds.classify(assessment.default_probability);
        debug!(
            loan_to_income_ratio,
            default_probability = assessment.default_probability,
            "applicant scored"
        );
        info!(
            credit_score = assessment.credit_score,
            rating = %assessment.rating,
            tier = %risk_tier,
            "credit risk assessed"
        );

        Ok(AssessmentReport {
            profile,
            loan_to_income_ratio,
            assessment,
            risk_tier,
            message: risk_tier.message(),
            assessed_at: Utc::now(),
        })
    }
}

fn check_probability(assessment: &RiskAssessment) -> Result<(), ModelError> {
    let probability = assessment.default_probability;
    if probability.is_finite() && (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ModelError::InvalidProbability(probability))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Model(#[from] ModelError),
}
