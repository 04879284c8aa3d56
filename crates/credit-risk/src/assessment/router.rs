use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::ApplicantSubmission;
use super::model::RiskModel;
use super::service::{AssessmentError, AssessmentService};

/// Router builder exposing HTTP endpoints for credit risk assessment.
pub fn assessment_router<M>(service: Arc<AssessmentService<M>>) -> Router
where
    M: RiskModel + 'static,
{
    Router::new()
        .route(
            "/api/v1/credit-risk/assessments",
            post(assess_handler::<M>),
        )
        .route("/api/v1/credit-risk/sample", get(sample_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler<M>(
    State(service): State<Arc<AssessmentService<M>>>,
    Json(submission): Json<ApplicantSubmission>,
) -> Response
where
    M: RiskModel + 'static,
{
    match service.assess(submission) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(AssessmentError::Intake(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn sample_handler() -> Json<ApplicantSubmission> {
    Json(ApplicantSubmission::sample())
}
