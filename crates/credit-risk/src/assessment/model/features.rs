use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantProfile, LoanPurpose, LoanType, ResidenceType};

/// Model inputs in the order the scorecard evaluates them.
///
/// Categorical fields are one-hot encoded against a dropped reference level
/// (`Mortgage`, `Auto`, `Secured`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Age,
    LoanTenureMonths,
    NumberOfOpenAccounts,
    CreditUtilizationRatio,
    LoanToIncome,
    DelinquencyRatio,
    AvgDpdPerDelinquency,
    ResidenceOwned,
    ResidenceRented,
    PurposeEducation,
    PurposeHome,
    PurposePersonal,
    LoanTypeUnsecured,
}

impl Feature {
    pub const ALL: [Feature; 13] = [
        Feature::Age,
        Feature::LoanTenureMonths,
        Feature::NumberOfOpenAccounts,
        Feature::CreditUtilizationRatio,
        Feature::LoanToIncome,
        Feature::DelinquencyRatio,
        Feature::AvgDpdPerDelinquency,
        Feature::ResidenceOwned,
        Feature::ResidenceRented,
        Feature::PurposeEducation,
        Feature::PurposeHome,
        Feature::PurposePersonal,
        Feature::LoanTypeUnsecured,
    ];

    /// Numeric features are min-max scaled; indicators are used as-is.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Feature::Age
                | Feature::LoanTenureMonths
                | Feature::NumberOfOpenAccounts
                | Feature::CreditUtilizationRatio
                | Feature::LoanToIncome
                | Feature::DelinquencyRatio
                | Feature::AvgDpdPerDelinquency
        )
    }

    pub fn raw_value(self, profile: &ApplicantProfile) -> f64 {
        match self {
            Feature::Age => f64::from(profile.age),
            Feature::LoanTenureMonths => f64::from(profile.loan_tenure_months),
            Feature::NumberOfOpenAccounts => f64::from(profile.num_open_accounts),
            Feature::CreditUtilizationRatio => f64::from(profile.credit_utilization_ratio),
            Feature::LoanToIncome => profile.loan_to_income_ratio(),
            Feature::DelinquencyRatio => f64::from(profile.delinquency_ratio),
            Feature::AvgDpdPerDelinquency => f64::from(profile.avg_days_past_due),
            Feature::ResidenceOwned => indicator(profile.residence_type == ResidenceType::Owned),
            Feature::ResidenceRented => indicator(profile.residence_type == ResidenceType::Rented),
            Feature::PurposeEducation => indicator(profile.loan_purpose == LoanPurpose::Education),
            Feature::PurposeHome => indicator(profile.loan_purpose == LoanPurpose::Home),
            Feature::PurposePersonal => indicator(profile.loan_purpose == LoanPurpose::Personal),
            Feature::LoanTypeUnsecured => indicator(profile.loan_type == LoanType::Unsecured),
        }
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Min-max bounds learned from the training population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    /// Values outside the training range extrapolate linearly, matching the fitted scaler.
    pub fn apply(&self, value: f64) -> f64 {
        let width = self.max - self.min;
        if width == 0.0 {
            0.0
        } else {
            (value - self.min) / width
        }
    }
}
