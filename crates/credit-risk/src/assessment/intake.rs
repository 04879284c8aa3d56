use serde::{Deserialize, Serialize};

use super::domain::{loan_to_income_ratio, ApplicantProfile, ApplicantSubmission};

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;
const MAX_PERCENT: u32 = 100;

const DEFAULT_OPEN_ACCOUNTS_MIN: u8 = 1;
const DEFAULT_OPEN_ACCOUNTS_MAX: u8 = 4;

/// Validation errors raised before a submission may reach the model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("age must be between 18 and 100 (found {0})")]
    AgeOutOfRange(u32),
    #[error("{field} must be a finite, non-negative amount (found {found})")]
    InvalidAmount { field: &'static str, found: f64 },
    #[error("annual income and loan amount must both be greater than zero")]
    NonPositiveAmounts,
    #[error("loan amount of {loan_amount} against annual income of {annual_income} gives no finite loan-to-income ratio")]
    UnboundedLoanToIncome { loan_amount: f64, annual_income: f64 },
    #[error("loan tenure must be at least one month")]
    ZeroTenure,
    #[error("{field} must be a percentage between 0 and 100 (found {found})")]
    PercentageOutOfRange { field: &'static str, found: u32 },
    #[error("open loan accounts must be between {min} and {max} (found {found})")]
    OpenAccountsOutOfRange { min: u8, max: u8, found: u32 },
}

/// Intake bounds that vary between deployments of the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakePolicy {
    pub open_accounts_min: u8,
    pub open_accounts_max: u8,
    pub require_positive_amounts: bool,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            open_accounts_min: DEFAULT_OPEN_ACCOUNTS_MIN,
            open_accounts_max: DEFAULT_OPEN_ACCOUNTS_MAX,
            require_positive_amounts: true,
        }
    }
}

/// Guard responsible for producing `ApplicantProfile` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Convert a raw submission into a validated applicant profile.
    pub fn profile_from_submission(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<ApplicantProfile, IntakeViolation> {
        if !(MIN_AGE..=MAX_AGE).contains(&submission.age) {
            return Err(IntakeViolation::AgeOutOfRange(submission.age));
        }

        let annual_income = checked_amount("annual income", submission.annual_income)?;
        let loan_amount = checked_amount("loan amount", submission.loan_amount)?;
        if self.policy.require_positive_amounts && (annual_income <= 0.0 || loan_amount <= 0.0) {
            return Err(IntakeViolation::NonPositiveAmounts);
        }
        if !loan_to_income_ratio(loan_amount, annual_income).is_finite() {
            return Err(IntakeViolation::UnboundedLoanToIncome {
                loan_amount,
                annual_income,
            });
        }

        if submission.loan_tenure_months == 0 {
            return Err(IntakeViolation::ZeroTenure);
        }

        let delinquency_ratio = percentage("delinquency ratio", submission.delinquency_ratio)?;
        let credit_utilization_ratio = percentage(
            "credit utilization ratio",
            submission.credit_utilization_ratio,
        )?;

        let min = self.policy.open_accounts_min;
        let max = self.policy.open_accounts_max;
        let num_open_accounts = u8::try_from(submission.num_open_accounts)
            .ok()
            .filter(|count| (min..=max).contains(count))
            .ok_or(IntakeViolation::OpenAccountsOutOfRange {
                min,
                max,
                found: submission.num_open_accounts,
            })?;

        Ok(ApplicantProfile {
            // bounded by MAX_AGE above
            age: submission.age as u8,
            annual_income,
            loan_amount,
            loan_tenure_months: submission.loan_tenure_months,
            avg_days_past_due: submission.avg_days_past_due,
            delinquency_ratio,
            credit_utilization_ratio,
            num_open_accounts,
            residence_type: submission.residence_type,
            loan_purpose: submission.loan_purpose,
            loan_type: submission.loan_type,
        })
    }
}

fn checked_amount(field: &'static str, value: f64) -> Result<f64, IntakeViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(IntakeViolation::InvalidAmount {
            field,
            found: value,
        })
    }
}

fn percentage(field: &'static str, value: u32) -> Result<u8, IntakeViolation> {
    if value <= MAX_PERCENT {
        Ok(value as u8)
    } else {
        Err(IntakeViolation::PercentageOutOfRange {
            field,
            found: value,
        })
    }
}
