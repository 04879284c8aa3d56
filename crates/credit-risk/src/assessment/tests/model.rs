use super::common::*;
use crate::assessment::domain::{CreditRating, LoanType, ResidenceType};
use crate::assessment::model::{
    Feature, LogisticScorecard, ModelError, RatingBand, RiskModel, ScaleRange, ScorecardConfig,
};

fn scorecard(config: ScorecardConfig) -> LogisticScorecard {
    LogisticScorecard::new(config).expect("scorecard config is valid")
}

#[test]
fn zero_weights_give_even_odds_and_midpoint_score() {
    let model = scorecard(flat_scorecard_config(0.0));

    let assessment = model.predict(&profile()).expect("prediction succeeds");

    assert_eq!(assessment.default_probability, 0.5);
    assert_eq!(assessment.credit_score, 600);
    assert_eq!(assessment.rating, CreditRating("Average".to_string()));
}

#[test]
fn logit_follows_scaled_loan_to_income() {
    let model = scorecard(ratio_only_config());
    let applicant = profile();

    let logit = model.logit(&applicant);
    let assessment = model.predict(&applicant).expect("prediction succeeds");

    assert!((logit - 2_560_000.0 / 1_200_000.0).abs() < 1e-12);
    let expected = 1.0 / (1.0 + (-logit).exp());
    assert!((assessment.default_probability - expected).abs() < 1e-12);
    assert_eq!(assessment.credit_score, model.credit_score(expected));
}

#[test]
fn numeric_features_are_min_max_scaled() {
    let model = scorecard(ScorecardConfig::reference());
    let vector = model.feature_vector(&profile());

    let value = |wanted: Feature| {
        vector
            .iter()
            .find(|(feature, _)| *feature == wanted)
            .map(|(_, value)| *value)
            .expect("feature present")
    };

    assert!((value(Feature::Age) - 10.0 / 52.0).abs() < 1e-12);
    assert!((value(Feature::DelinquencyRatio) - 0.3).abs() < 1e-12);
    assert!((value(Feature::AvgDpdPerDelinquency) - 0.5).abs() < 1e-12);
    assert_eq!(value(Feature::ResidenceOwned), 1.0);
    assert_eq!(value(Feature::ResidenceRented), 0.0);
    assert_eq!(value(Feature::PurposeEducation), 1.0);
    assert_eq!(value(Feature::LoanTypeUnsecured), 1.0);
}

#[test]
fn reference_levels_encode_as_all_zero_indicators() {
    let model = scorecard(ScorecardConfig::reference());
    let mut applicant = profile();
    applicant.residence_type = ResidenceType::Mortgage;
    applicant.loan_purpose = crate::assessment::LoanPurpose::Auto;
    applicant.loan_type = LoanType::Secured;

    let indicators: Vec<f64> = model
        .feature_vector(&applicant)
        .into_iter()
        .filter(|(feature, _)| !feature.is_numeric())
        .map(|(_, value)| value)
        .collect();

    assert_eq!(indicators.len(), 6);
    assert!(indicators.iter().all(|value| *value == 0.0));
}

#[test]
fn degenerate_scale_contributes_zero() {
    let range = ScaleRange { min: 4.0, max: 4.0 };
    assert_eq!(range.apply(4.0), 0.0);
    assert_eq!(range.apply(9.0), 0.0);
}

#[test]
fn score_maps_probability_onto_range() {
    let model = scorecard(ScorecardConfig::reference());
    assert_eq!(model.credit_score(0.0), 900);
    assert_eq!(model.credit_score(1.0), 300);
    assert_eq!(model.credit_score(0.25), 750);
    // floor, not round
    assert_eq!(model.credit_score(0.2505), 749);
}

#[test]
fn rating_bands_are_half_open_with_inclusive_top() {
    let model = scorecard(ScorecardConfig::reference());
    let label = |score: u16| model.rating(score).0;

    assert_eq!(label(300), "Poor");
    assert_eq!(label(499), "Poor");
    assert_eq!(label(500), "Average");
    assert_eq!(label(649), "Average");
    assert_eq!(label(650), "Good");
    assert_eq!(label(749), "Good");
    assert_eq!(label(750), "Excellent");
    assert_eq!(label(900), "Excellent");
}

#[test]
fn reference_scorecard_rates_sample_applicant() {
    let model = scorecard(ScorecardConfig::reference());

    let assessment = model.predict(&profile()).expect("prediction succeeds");

    assert!((assessment.default_probability - 0.057_757).abs() < 1e-5);
    assert_eq!(assessment.credit_score, 865);
    assert_eq!(assessment.rating.0, "Excellent");
}

#[test]
fn rejects_artifact_missing_a_feature() {
    let mut config = ScorecardConfig::reference();
    config
        .features
        .retain(|weight| weight.feature != Feature::LoanToIncome);

    match LogisticScorecard::new(config) {
        Err(ModelError::InvalidArtifact(detail)) => assert!(detail.contains("LoanToIncome")),
        other => panic!("expected invalid artifact, got {other:?}"),
    }
}

#[test]
fn rejects_numeric_feature_without_scale() {
    let mut config = ScorecardConfig::reference();
    if let Some(weight) = config
        .features
        .iter_mut()
        .find(|weight| weight.feature == Feature::Age)
    {
        weight.scale = None;
    }

    assert!(matches!(
        LogisticScorecard::new(config),
        Err(ModelError::InvalidArtifact(_))
    ));
}

#[test]
fn rejects_gapped_or_short_rating_bands() {
    let mut gapped = ScorecardConfig::reference();
    gapped.bands[1].min_score = 520;
    assert!(matches!(
        LogisticScorecard::new(gapped),
        Err(ModelError::InvalidArtifact(_))
    ));

    let mut short = ScorecardConfig::reference();
    short.bands.pop();
    assert!(matches!(
        LogisticScorecard::new(short),
        Err(ModelError::InvalidArtifact(_))
    ));

    let mut empty = ScorecardConfig::reference();
    empty.bands.clear();
    assert!(matches!(
        LogisticScorecard::new(empty),
        Err(ModelError::InvalidArtifact(_))
    ));
}

#[test]
fn custom_bands_and_range_are_honoured() {
    let mut config = flat_scorecard_config(0.0);
    config.score.base = 0;
    config.score.span = 100;
    config.bands = vec![
        RatingBand {
            label: "Decline".to_string(),
            min_score: 0,
            max_score: 60,
        },
        RatingBand {
            label: "Approve".to_string(),
            min_score: 60,
            max_score: 100,
        },
    ];
    let model = scorecard(config);

    let assessment = model.predict(&profile()).expect("prediction succeeds");
    assert_eq!(assessment.credit_score, 50);
    assert_eq!(assessment.rating.0, "Decline");
}

#[test]
fn loads_artifact_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "credit-risk-scorecard-{}.json",
        std::process::id()
    ));
    let config = flat_scorecard_config(1.5);
    std::fs::write(&path, serde_json::to_vec_pretty(&config).expect("serializes"))
        .expect("artifact written");

    let loaded = LogisticScorecard::from_path(&path).expect("artifact loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.config(), &config);
}

#[test]
fn missing_artifact_reports_path() {
    let err = LogisticScorecard::from_path("/nonexistent/credit-risk/scorecard.json")
        .expect_err("missing file rejected");
    assert!(matches!(err, ModelError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/credit-risk/scorecard.json"));
}

#[test]
fn artifact_defaults_score_range_and_bands() {
    let raw = serde_json::json!({
        "intercept": 0.0,
        "features": ScorecardConfig::reference().features,
    });
    let config: ScorecardConfig = serde_json::from_value(raw).expect("artifact parses");

    assert_eq!(config.score.base, 300);
    assert_eq!(config.score.span, 600);
    assert_eq!(config.bands.len(), 4);
    assert!(LogisticScorecard::new(config).is_ok());
}
