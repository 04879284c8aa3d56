use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Probability above which an applicant is always treated as high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.75;
/// Probability above which an applicant is no longer low risk.
pub const ELEVATED_RISK_THRESHOLD: f64 = 0.5;

/// Display bucket selected from the default probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk of Default - Likely Safe",
            RiskTier::Medium => "Moderate Risk of Default - Review Recommended",
            RiskTier::High => "High Risk of Default - Caution Advised",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold tables used to bucket default probabilities.
///
/// `ThreeTier` is canonical. `TwoTier` keeps the single `> 0.5` cut-off for deployments that
/// never surfaced a medium band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdTable {
    #[default]
    ThreeTier,
    TwoTier,
}

impl ThresholdTable {
    /// Every probability lands in exactly one tier; `NaN` falls through to `Low`.
    pub fn classify(self, default_probability: f64) -> RiskTier {
        match self {
            ThresholdTable::ThreeTier => {
                if default_probability > HIGH_RISK_THRESHOLD {
                    RiskTier::High
                } else if default_probability > ELEVATED_RISK_THRESHOLD {
                    RiskTier::Medium
                } else {
                    RiskTier::Low
                }
            }
            ThresholdTable::TwoTier => {
                if default_probability > ELEVATED_RISK_THRESHOLD {
                    RiskTier::High
                } else {
                    RiskTier::Low
                }
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ThresholdTable::ThreeTier => "three_tier",
            ThresholdTable::TwoTier => "two_tier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown threshold table '{0}'")]
pub struct UnknownThresholdTable(pub String);

impl FromStr for ThresholdTable {
    type Err = UnknownThresholdTable;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "three_tier" | "three" | "3" => Ok(ThresholdTable::ThreeTier),
            "two_tier" | "two" | "2" => Ok(ThresholdTable::TwoTier),
            _ => Err(UnknownThresholdTable(value.to_string())),
        }
    }
}
