use credit_risk::assessment::{AssessmentService, LogisticScorecard, ModelError};
use credit_risk::config::ScoringConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the configured scorecard artifact, or the reference scorecard when none is set.
pub(crate) fn load_scorecard(config: &ScoringConfig) -> Result<LogisticScorecard, ModelError> {
    match &config.model_path {
        Some(path) => {
            let scorecard = LogisticScorecard::from_path(path)?;
            info!(path = %path.display(), "loaded scorecard artifact");
            Ok(scorecard)
        }
        None => {
            info!("no scorecard artifact configured; using reference scorecard");
            LogisticScorecard::reference()
        }
    }
}

pub(crate) fn assessment_service(
    config: &ScoringConfig,
) -> Result<AssessmentService<LogisticScorecard>, ModelError> {
    let scorecard = load_scorecard(config)?;
    Ok(AssessmentService::new(
        Arc::new(scorecard),
        config.intake,
        config.thresholds,
    ))
}
