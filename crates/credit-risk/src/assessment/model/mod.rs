mod config;
mod features;

pub use config::{FeatureWeight, RatingBand, ScoreRange, ScorecardConfig};
pub use features::{Feature, ScaleRange};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::domain::{ApplicantProfile, CreditRating, RiskAssessment};

/// Scoring boundary: maps a validated profile to a default probability, score, and rating.
pub trait RiskModel: Send + Sync {
    fn predict(&self, profile: &ApplicantProfile) -> Result<RiskAssessment, ModelError>;
}

/// Failures raised while loading or evaluating a risk model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Artifact(#[from] serde_json::Error),
    #[error("model artifact rejected: {0}")]
    InvalidArtifact(String),
    #[error("model returned default probability {0} outside [0, 1]")]
    InvalidProbability(f64),
    #[error("model unavailable: {0}")]
    Unavailable(String),
}

impl ScorecardConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

/// Logistic regression over min-max scaled features, mapped onto a linear score range.
#[derive(Debug, Clone)]
pub struct LogisticScorecard {
    config: ScorecardConfig,
}

impl LogisticScorecard {
    pub fn new(config: ScorecardConfig) -> Result<Self, ModelError> {
        validate(&config)?;
        Ok(Self { config })
    }

    pub fn reference() -> Result<Self, ModelError> {
        Self::new(ScorecardConfig::reference())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        Self::new(ScorecardConfig::from_path(path)?)
    }

    pub fn config(&self) -> &ScorecardConfig {
        &self.config
    }

    /// Scaled feature values in artifact order.
    pub fn feature_vector(&self, profile: &ApplicantProfile) -> Vec<(Feature, f64)> {
        self.config
            .features
            .iter()
            .map(|weight| {
                let raw = weight.feature.raw_value(profile);
                let value = match &weight.scale {
                    Some(range) if weight.feature.is_numeric() => range.apply(raw),
                    _ => raw,
                };
                (weight.feature, value)
            })
            .collect()
    }

    pub fn logit(&self, profile: &ApplicantProfile) -> f64 {
        self.feature_vector(profile)
            .into_iter()
            .zip(&self.config.features)
            .fold(self.config.intercept, |acc, ((_, value), weight)| {
                acc + weight.coefficient * value
            })
    }

    pub fn credit_score(&self, default_probability: f64) -> u16 {
        let range = self.config.score;
        let score = f64::from(range.base) + (1.0 - default_probability) * f64::from(range.span);
        score
            .floor()
            .clamp(f64::from(range.base), f64::from(range.max())) as u16
    }

    pub fn rating(&self, credit_score: u16) -> CreditRating {
        let bands = &self.config.bands;
        let last = bands.len().saturating_sub(1);
        bands
            .iter()
            .enumerate()
            .find(|(index, band)| {
                credit_score >= band.min_score
                    && (credit_score < band.max_score
                        || (*index == last && credit_score == band.max_score))
            })
            .map(|(_, band)| CreditRating(band.label.clone()))
            // validation guarantees the bands cover the score range
            .unwrap_or_else(|| CreditRating("Undefined".to_string()))
    }
}

impl RiskModel for LogisticScorecard {
    fn predict(&self, profile: &ApplicantProfile) -> Result<RiskAssessment, ModelError> {
        let logit = self.logit(profile);
        let default_probability = 1.0 / (1.0 + (-logit).exp());
        if !default_probability.is_finite() {
            return Err(ModelError::InvalidProbability(default_probability));
        }

        let credit_score = self.credit_score(default_probability);
        Ok(RiskAssessment {
            default_probability,
            credit_score,
            rating: self.rating(credit_score),
        })
    }
}

fn validate(config: &ScorecardConfig) -> Result<(), ModelError> {
    let reject = |detail: String| Err(ModelError::InvalidArtifact(detail));

    if !config.intercept.is_finite() {
        return reject("intercept must be finite".to_string());
    }

    for feature in Feature::ALL {
        let count = config
            .features
            .iter()
            .filter(|weight| weight.feature == feature)
            .count();
        if count != 1 {
            return reject(format!(
                "feature {:?} must appear exactly once (found {count})",
                feature
            ));
        }
    }

    for weight in &config.features {
        if !weight.coefficient.is_finite() {
            return reject(format!("coefficient for {:?} must be finite", weight.feature));
        }
        match (&weight.scale, weight.feature.is_numeric()) {
            (Some(range), true) => {
                if !range.min.is_finite() || !range.max.is_finite() || range.max < range.min {
                    return reject(format!(
                        "scale for {:?} must satisfy min <= max",
                        weight.feature
                    ));
                }
            }
            (None, true) => {
                return reject(format!("numeric feature {:?} needs a scale", weight.feature));
            }
            (_, false) => {}
        }
    }

    let range = config.score;
    if range.span == 0 || range.base.checked_add(range.span).is_none() {
        return reject("score range must have a positive span".to_string());
    }

    let Some(first) = config.bands.first() else {
        return reject("at least one rating band is required".to_string());
    };
    if first.min_score != range.base {
        return reject(format!(
            "first rating band must start at {} (found {})",
            range.base, first.min_score
        ));
    }
    for band in &config.bands {
        if band.min_score >= band.max_score {
            return reject(format!("rating band '{}' is empty", band.label));
        }
    }
    for pair in config.bands.windows(2) {
        if pair[0].max_score != pair[1].min_score {
            return reject(format!(
                "rating bands '{}' and '{}' are not contiguous",
                pair[0].label, pair[1].label
            ));
        }
    }
    if let Some(last) = config.bands.last() {
        if last.max_score != range.max() {
            return reject(format!(
                "last rating band must end at {} (found {})",
                range.max(),
                last.max_score
            ));
        }
    }

    Ok(())
}
