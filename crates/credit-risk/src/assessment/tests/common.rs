use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    ApplicantProfile, ApplicantSubmission, CreditRating, LoanPurpose, LoanType, ResidenceType,
    RiskAssessment,
};
use crate::assessment::intake::IntakePolicy;
use crate::assessment::messaging::ThresholdTable;
use crate::assessment::model::{
    Feature, FeatureWeight, ModelError, RiskModel, ScaleRange, ScoreRange, ScorecardConfig,
};
use crate::assessment::{assessment_router, AssessmentService, LogisticScorecard};

pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission::sample()
}

pub(super) fn high_risk_submission() -> ApplicantSubmission {
    ApplicantSubmission {
        age: 22,
        annual_income: 300_000.0,
        loan_amount: 1_500_000.0,
        loan_tenure_months: 60,
        avg_days_past_due: 40,
        delinquency_ratio: 90,
        credit_utilization_ratio: 95,
        num_open_accounts: 4,
        residence_type: ResidenceType::Rented,
        loan_purpose: LoanPurpose::Personal,
        loan_type: LoanType::Unsecured,
    }
}

pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 28,
        annual_income: 1_200_000.0,
        loan_amount: 2_560_000.0,
        loan_tenure_months: 36,
        avg_days_past_due: 20,
        delinquency_ratio: 30,
        credit_utilization_ratio: 30,
        num_open_accounts: 2,
        residence_type: ResidenceType::Owned,
        loan_purpose: LoanPurpose::Education,
        loan_type: LoanType::Unsecured,
    }
}

/// Scorecard with every weight zeroed so the logit is just the intercept.
pub(super) fn flat_scorecard_config(intercept: f64) -> ScorecardConfig {
    let mut config = ScorecardConfig::reference();
    config.intercept = intercept;
    for weight in &mut config.features {
        weight.coefficient = 0.0;
    }
    config
}

/// Scorecard driven only by the loan-to-income ratio, unscaled.
pub(super) fn ratio_only_config() -> ScorecardConfig {
    let mut config = flat_scorecard_config(0.0);
    config.features = Feature::ALL
        .into_iter()
        .map(|feature| FeatureWeight {
            feature,
            coefficient: if feature == Feature::LoanToIncome {
                1.0
            } else {
                0.0
            },
            scale: feature
                .is_numeric()
                .then_some(if feature == Feature::LoanToIncome {
                    ScaleRange { min: 0.0, max: 1.0 }
                } else {
                    ScaleRange { min: 0.0, max: 100.0 }
                }),
        })
        .collect();
    config.score = ScoreRange::default();
    config
}

/// Model double that records every profile it is asked to score.
pub(super) struct RecordingModel {
    pub(super) probability: f64,
    calls: Mutex<Vec<ApplicantProfile>>,
}

impl RecordingModel {
    pub(super) fn returning(probability: f64) -> Self {
        Self {
            probability,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<ApplicantProfile> {
        self.calls.lock().expect("model mutex poisoned").clone()
    }
}

impl RiskModel for RecordingModel {
    fn predict(&self, profile: &ApplicantProfile) -> Result<RiskAssessment, ModelError> {
        self.calls
            .lock()
            .expect("model mutex poisoned")
            .push(profile.clone());
        Ok(RiskAssessment {
            default_probability: self.probability,
            credit_score: 612,
            rating: CreditRating("Average".to_string()),
        })
    }
}

pub(super) struct UnavailableModel;

impl RiskModel for UnavailableModel {
    fn predict(&self, _profile: &ApplicantProfile) -> Result<RiskAssessment, ModelError> {
        Err(ModelError::Unavailable("scorecard not loaded".to_string()))
    }
}

pub(super) fn recording_service(
    probability: f64,
) -> (AssessmentService<RecordingModel>, Arc<RecordingModel>) {
    let model = Arc::new(RecordingModel::returning(probability));
    let service = AssessmentService::new(
        model.clone(),
        IntakePolicy::default(),
        ThresholdTable::default(),
    );
    (service, model)
}

pub(super) fn reference_service() -> AssessmentService<LogisticScorecard> {
    let model = LogisticScorecard::reference().expect("reference scorecard is valid");
    AssessmentService::new(
        Arc::new(model),
        IntakePolicy::default(),
        ThresholdTable::default(),
    )
}

pub(super) fn router_with_service<M>(service: AssessmentService<M>) -> axum::Router
where
    M: RiskModel + 'static,
{
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
