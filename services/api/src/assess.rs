use crate::infra::assessment_service;
use clap::Args;
use credit_risk::assessment::{
    score_csv, ApplicantSubmission, AssessmentReport, LoanPurpose, LoanType, ResidenceType,
};
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::telemetry;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Applicant age in years (18-100)
    #[arg(long)]
    pub(crate) age: Option<u32>,
    /// Annual income in currency units
    #[arg(long)]
    pub(crate) income: Option<f64>,
    /// Requested loan amount in currency units
    #[arg(long)]
    pub(crate) loan_amount: Option<f64>,
    /// Loan tenure in months
    #[arg(long)]
    pub(crate) tenure_months: Option<u32>,
    /// Average days past due per delinquency
    #[arg(long)]
    pub(crate) avg_dpd: Option<u32>,
    /// Delinquency ratio as a percentage (0-100)
    #[arg(long)]
    pub(crate) delinquency_ratio: Option<u32>,
    /// Credit utilization ratio as a percentage (0-100)
    #[arg(long)]
    pub(crate) credit_utilization: Option<u32>,
    /// Number of open loan accounts
    #[arg(long)]
    pub(crate) open_accounts: Option<u32>,
    /// Owned, Rented, or Mortgage
    #[arg(long)]
    pub(crate) residence_type: Option<ResidenceType>,
    /// Education, Home, Auto, or Personal
    #[arg(long)]
    pub(crate) loan_purpose: Option<LoanPurpose>,
    /// Unsecured or Secured
    #[arg(long)]
    pub(crate) loan_type: Option<LoanType>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn submission(&self) -> ApplicantSubmission {
        let sample = ApplicantSubmission::sample();
        ApplicantSubmission {
            age: self.age.unwrap_or(sample.age),
            annual_income: self.income.unwrap_or(sample.annual_income),
            loan_amount: self.loan_amount.unwrap_or(sample.loan_amount),
            loan_tenure_months: self.tenure_months.unwrap_or(sample.loan_tenure_months),
            avg_days_past_due: self.avg_dpd.unwrap_or(sample.avg_days_past_due),
            delinquency_ratio: self.delinquency_ratio.unwrap_or(sample.delinquency_ratio),
            credit_utilization_ratio: self
                .credit_utilization
                .unwrap_or(sample.credit_utilization_ratio),
            num_open_accounts: self.open_accounts.unwrap_or(sample.num_open_accounts),
            residence_type: self.residence_type.unwrap_or(sample.residence_type),
            loan_purpose: self.loan_purpose.unwrap_or(sample.loan_purpose),
            loan_type: self.loan_type.unwrap_or(sample.loan_type),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Applicant CSV with one submission per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination CSV (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = assessment_service(&config.scoring)?;
    let report = service.assess(args.submission())?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Report payload unavailable: {}", err),
        }
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { input, output } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = assessment_service(&config.scoring)?;
    let reader = BufReader::new(File::open(&input)?);

    let summary = match output {
        Some(path) => score_csv(&service, reader, BufWriter::new(File::create(path)?))?,
        None => score_csv(&service, reader, std::io::stdout().lock())?,
    };

    eprintln!(
        "Scored {} applicant(s) from {} | {} rejected",
        summary.scored,
        input.display(),
        summary.rejected
    );
    Ok(())
}

pub(crate) fn render_report(report: &AssessmentReport) -> String {
    let assessment = &report.assessment;
    format!(
        "Credit risk evaluation\n\
         - Loan-to-income ratio: {:.2}\n\
         - Default probability: {:.2}%\n\
         - Credit score: {}\n\
         - Risk rating: {}\n\
         {}\n",
        report.loan_to_income_ratio,
        assessment.default_probability * 100.0,
        assessment.credit_score,
        assessment.rating,
        report.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_risk::assessment::{
        AssessmentService, IntakePolicy, LogisticScorecard, ThresholdTable,
    };
    use std::sync::Arc;

    #[test]
    fn unspecified_fields_fall_back_to_sample() {
        let args = AssessArgs {
            age: Some(40),
            loan_type: Some(LoanType::Secured),
            ..AssessArgs::default()
        };

        let submission = args.submission();

        let sample = ApplicantSubmission::sample();
        assert_eq!(submission.age, 40);
        assert_eq!(submission.loan_type, LoanType::Secured);
        assert_eq!(submission.annual_income, sample.annual_income);
        assert_eq!(submission.residence_type, sample.residence_type);
    }

    #[test]
    fn render_formats_percentages_and_ratio() {
        let scorecard = LogisticScorecard::reference().expect("reference scorecard");
        let service = AssessmentService::new(
            Arc::new(scorecard),
            IntakePolicy::default(),
            ThresholdTable::default(),
        );
        let report = service
            .assess(ApplicantSubmission::sample())
            .expect("sample scored");

        let rendered = render_report(&report);

        assert!(rendered.contains("Loan-to-income ratio: 2.13"));
        assert!(rendered.contains("Default probability: 5.78%"));
        assert!(rendered.contains("Credit score: 865"));
        assert!(rendered.contains("Risk rating: Excellent"));
        assert!(rendered.ends_with("Low Risk of Default - Likely Safe\n"));
    }
}
