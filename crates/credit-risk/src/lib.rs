//! Applicant credit risk assessment.
//!
//! Submissions pass through the intake guard, are scored once by a [`assessment::RiskModel`],
//! and the resulting default probability is mapped onto a risk tier for display.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
