//! CSV batch scoring.
//!
//! Input headers are the `ApplicantSubmission` field names. Each data row produces one output
//! row; rows that fail to parse, fail intake, or fail scoring are reported in the `error` column
//! and the batch carries on. Structural CSV faults (bad quoting, ragged rows, I/O) abort.
//! The result header is written even when the input has no data rows.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::info;

use super::domain::ApplicantSubmission;
use super::messaging::RiskTier;
use super::model::RiskModel;
use super::service::AssessmentService;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("malformed applicant CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush batch output: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts reported once the batch finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchSummary {
    pub scored: usize,
    pub rejected: usize,
}

const RESULT_COLUMNS: [&str; 6] = [
    "row",
    "default_probability",
    "credit_score",
    "rating",
    "risk_tier",
    "error",
];

#[derive(Debug, Serialize)]
struct BatchResultRow {
    row: usize,
    default_probability: Option<f64>,
    credit_score: Option<u16>,
    rating: Option<String>,
    risk_tier: Option<RiskTier>,
    error: Option<String>,
}

impl BatchResultRow {
    fn rejected(row: usize, error: String) -> Self {
        Self {
            row,
            default_probability: None,
            credit_score: None,
            rating: None,
            risk_tier: None,
            error: Some(error),
        }
    }
}

pub fn score_csv<M, R, W>(
    service: &AssessmentService<M>,
    reader: R,
    writer: W,
) -> Result<BatchSummary, BatchError>
where
    M: RiskModel + 'static,
    R: Read,
    W: Write,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(RESULT_COLUMNS)?;
    let mut summary = BatchSummary::default();

    for (index, record) in csv_reader.deserialize::<ApplicantSubmission>().enumerate() {
        let row = index + 1;
        let submission = match record {
            Ok(submission) => submission,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                summary.rejected += 1;
                csv_writer.serialize(BatchResultRow::rejected(row, err.to_string()))?;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let result = match service.assess(submission) {
            Ok(report) => {
                summary.scored += 1;
                BatchResultRow {
                    row,
                    default_probability: Some(report.assessment.default_probability),
                    credit_score: Some(report.assessment.credit_score),
                    rating: Some(report.assessment.rating.0),
                    risk_tier: Some(report.risk_tier),
                    error: None,
                }
            }
            Err(err) => {
                summary.rejected += 1;
                BatchResultRow::rejected(row, err.to_string())
            }
        };
        csv_writer.serialize(result)?;
    }

    csv_writer.flush()?;
    info!(
        scored = summary.scored,
        rejected = summary.rejected,
        "batch scoring complete"
    );
    Ok(summary)
}
