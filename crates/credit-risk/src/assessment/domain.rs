use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::messaging::RiskTier;

/// Raised when a categorical field carries a value outside its fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}' (expected one of: {})", .expected.join(", "))]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

fn parse_category<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    label: fn(T) -> &'static str,
    expected: &'static [&'static str],
) -> Result<T, UnknownCategory> {
    let trimmed = value.trim();
    all.iter()
        .copied()
        .find(|candidate| label(*candidate).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownCategory {
            field,
            value: value.to_string(),
            expected,
        })
}

/// Housing situation declared by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ResidenceType {
    Owned,
    Rented,
    Mortgage,
}

impl ResidenceType {
    pub const ALL: [ResidenceType; 3] = [
        ResidenceType::Owned,
        ResidenceType::Rented,
        ResidenceType::Mortgage,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ResidenceType::Owned => "Owned",
            ResidenceType::Rented => "Rented",
            ResidenceType::Mortgage => "Mortgage",
        }
    }
}

impl fmt::Display for ResidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResidenceType {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_category(
            "residence type",
            value,
            &Self::ALL,
            Self::label,
            &["Owned", "Rented", "Mortgage"],
        )
    }
}

impl TryFrom<String> for ResidenceType {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stated use of the requested funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum LoanPurpose {
    Education,
    Home,
    Auto,
    Personal,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 4] = [
        LoanPurpose::Education,
        LoanPurpose::Home,
        LoanPurpose::Auto,
        LoanPurpose::Personal,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanPurpose::Education => "Education",
            LoanPurpose::Home => "Home",
            LoanPurpose::Auto => "Auto",
            LoanPurpose::Personal => "Personal",
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanPurpose {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_category(
            "loan purpose",
            value,
            &Self::ALL,
            Self::label,
            &["Education", "Home", "Auto", "Personal"],
        )
    }
}

impl TryFrom<String> for LoanPurpose {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum LoanType {
    Unsecured,
    Secured,
}

impl LoanType {
    pub const ALL: [LoanType; 2] = [LoanType::Unsecured, LoanType::Secured];

    pub const fn label(self) -> &'static str {
        match self {
            LoanType::Unsecured => "Unsecured",
            LoanType::Secured => "Secured",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanType {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_category(
            "loan type",
            value,
            &Self::ALL,
            Self::label,
            &["Unsecured", "Secured"],
        )
    }
}

impl TryFrom<String> for LoanType {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raw applicant attributes as captured by the intake form, API payload, or batch row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub age: u32,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub loan_tenure_months: u32,
    pub avg_days_past_due: u32,
    pub delinquency_ratio: u32,
    pub credit_utilization_ratio: u32,
    pub num_open_accounts: u32,
    pub residence_type: ResidenceType,
    pub loan_purpose: LoanPurpose,
    pub loan_type: LoanType,
}

impl ApplicantSubmission {
    /// The applicant pre-filled on the assessment form.
    pub fn sample() -> Self {
        Self {
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
}

/// Validated applicant attributes handed to the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u8,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub loan_tenure_months: u32,
    pub avg_days_past_due: u32,
    pub delinquency_ratio: u8,
    pub credit_utilization_ratio: u8,
    pub num_open_accounts: u8,
    pub residence_type: ResidenceType,
    pub loan_purpose: LoanPurpose,
    pub loan_type: LoanType,
}

impl ApplicantProfile {
    pub fn loan_to_income_ratio(&self) -> f64 {
        loan_to_income_ratio(self.loan_amount, self.annual_income)
    }
}

/// Loan amount over annual income; zero when there is no income to divide by.
pub fn loan_to_income_ratio(loan_amount: f64, annual_income: f64) -> f64 {
    if annual_income > 0.0 {
        loan_amount / annual_income
    } else {
        0.0
    }
}

/// Rating label attached by the model's rating bands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditRating(pub String);

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of a single scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub default_probability: f64,
    pub credit_score: u16,
    pub rating: CreditRating,
}

/// Everything the presentation layer renders for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub profile: ApplicantProfile,
    pub loan_to_income_ratio: f64,
    pub assessment: RiskAssessment,
    pub risk_tier: RiskTier,
    pub message: &'static str,
    pub assessed_at: DateTime<Utc>,
}
