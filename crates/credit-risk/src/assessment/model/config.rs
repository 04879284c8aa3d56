use serde::{Deserialize, Serialize};

use super::features::{Feature, ScaleRange};

/// Serialized scorecard artifact: weights, scaling bounds, score range, and rating bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardConfig {
    pub intercept: f64,
    pub features: Vec<FeatureWeight>,
    #[serde(default)]
    pub score: ScoreRange,
    #[serde(default = "default_bands")]
    pub bands: Vec<RatingBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub feature: Feature,
    pub coefficient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleRange>,
}

/// Linear mapping from survival probability onto the bureau-style score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub base: u16,
    pub span: u16,
}

impl ScoreRange {
    pub fn max(&self) -> u16 {
        self.base.saturating_add(self.span)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            base: 300,
            span: 600,
        }
    }
}

/// Half-open `[min_score, max_score)` band; the last band also includes its upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBand {
    pub label: String,
    pub min_score: u16,
    pub max_score: u16,
}

impl RatingBand {
    fn new(label: &str, min_score: u16, max_score: u16) -> Self {
        Self {
            label: label.to_string(),
            min_score,
            max_score,
        }
    }
}

pub(crate) fn default_bands() -> Vec<RatingBand> {
    vec![
        RatingBand::new("Poor", 300, 500),
        RatingBand::new("Average", 500, 650),
        RatingBand::new("Good", 650, 750),
        RatingBand::new("Excellent", 750, 900),
    ]
}

impl ScorecardConfig {
    /// Reference scorecard shipped with the service when no artifact is configured.
    pub fn reference() -> Self {
        let weights = [
            (Feature::Age, -1.8, Some((18.0, 70.0))),
            (Feature::LoanTenureMonths, 1.6, Some((6.0, 60.0))),
            (Feature::NumberOfOpenAccounts, 1.2, Some((1.0, 4.0))),
            (Feature::CreditUtilizationRatio, 3.0, Some((0.0, 100.0))),
            (Feature::LoanToIncome, 3.5, Some((0.3, 5.0))),
            (Feature::DelinquencyRatio, 6.0, Some((0.0, 100.0))),
            (Feature::AvgDpdPerDelinquency, 3.8, Some((0.0, 40.0))),
            (Feature::ResidenceOwned, -0.9, None),
            (Feature::ResidenceRented, 0.4, None),
            (Feature::PurposeEducation, -0.3, None),
            (Feature::PurposeHome, -0.6, None),
            (Feature::PurposePersonal, 0.5, None),
            (Feature::LoanTypeUnsecured, 0.7, None),
        ];

        Self {
            intercept: -9.2,
            features: weights
                .into_iter()
                .map(|(feature, coefficient, scale)| FeatureWeight {
                    feature,
                    coefficient,
                    scale: scale.map(|(min, max)| ScaleRange { min, max }),
                })
                .collect(),
            score: ScoreRange::default(),
            bands: default_bands(),
        }
    }
}
