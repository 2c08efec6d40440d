use serde::Serialize;
use std::sync::Arc;

use super::applicants::{applicant_stats, ApplicantStats, ApplicationRecord};
use super::jobs::{job_stats, EmployerJob, JobStats};

/// Everything the employer dashboard tiles render, recomputed from scratch on
/// every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub applicants: ApplicantStats,
    pub jobs: JobStats,
}

impl DashboardSummary {
    pub fn compute(jobs: &[Arc<EmployerJob>], applicants: &[Arc<ApplicationRecord>]) -> Self {
        Self {
            applicants: applicant_stats(applicants),
            jobs: job_stats(jobs),
        }
    }

    pub fn hire_rate(&self) -> &str {
        &self.applicants.hire_rate
    }

    pub fn conversion_rate(&self) -> &str {
        &self.jobs.conversion_rate
    }

    pub fn average_applicants_per_job(&self) -> &str {
        &self.jobs.average_applicants_per_job
    }
}

/// `part / whole * 100` to one decimal place, `"0"` when `whole` is zero.
pub(crate) fn percentage(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0".to_string();
    }
    tenths(u128::from(part) * 100, u128::from(whole))
}

/// `numerator / denominator` to one decimal place, `"0"` when the denominator is zero.
pub(crate) fn one_decimal_ratio(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "0".to_string();
    }
    tenths(u128::from(numerator), u128::from(denominator))
}

/// One decimal place with ties rounded up, computed in integer tenths.
fn tenths(numerator: u128, denominator: u128) -> String {
    let tenths = (numerator * 20 + denominator) / (denominator * 2);
    format!("{}.{}", tenths / 10, tenths % 10)
}
