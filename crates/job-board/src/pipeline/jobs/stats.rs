use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{EmployerJob, JobStatus};
use crate::pipeline::dashboard::{one_decimal_ratio, percentage};

/// Employer-side dashboard tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub total_jobs: usize,
    pub by_status: BTreeMap<JobStatus, usize>,
    pub total_applicants: u64,
    pub total_views: u64,
    pub average_applicants_per_job: String,
    pub conversion_rate: String,
}

pub fn job_stats(jobs: &[Arc<EmployerJob>]) -> JobStats {
    let mut by_status: BTreeMap<JobStatus, usize> =
        JobStatus::ordered().into_iter().map(|status| (status, 0)).collect();
    let mut total_applicants = 0u64;
    let mut total_views = 0u64;

    for job in jobs {
        *by_status.entry(job.status).or_default() += 1;
        total_applicants += u64::from(job.applicants);
        total_views += u64::from(job.views);
    }

    JobStats {
        total_jobs: jobs.len(),
        by_status,
        total_applicants,
        total_views,
        average_applicants_per_job: one_decimal_ratio(total_applicants, jobs.len() as u64),
        conversion_rate: percentage(total_applicants, total_views),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::FixtureSet;

    fn sample_jobs() -> Vec<Arc<EmployerJob>> {
        FixtureSet::sample().jobs.into_iter().map(Arc::new).collect()
    }

    #[test]
    fn empty_board_reports_zero_rates() {
        let stats = job_stats(&[]);
        assert_eq!(stats.total_jobs, 0);
        assert_eq!(stats.average_applicants_per_job, "0");
        assert_eq!(stats.conversion_rate, "0");
        assert!(stats.by_status.values().all(|count| *count == 0));
    }

    #[test]
    fn sample_board_aggregates_counters() {
        let stats = job_stats(&sample_jobs());
        assert_eq!(stats.total_jobs, 4);
        assert_eq!(stats.total_applicants, 100);
        assert_eq!(stats.total_views, 1000);
        assert_eq!(stats.average_applicants_per_job, "25.0");
        assert_eq!(stats.conversion_rate, "10.0");
        assert_eq!(stats.by_status[&JobStatus::Active], 2);
        assert_eq!(stats.by_status[&JobStatus::Paused], 1);
        assert_eq!(stats.by_status[&JobStatus::Closed], 1);
    }

    #[test]
    fn jobs_without_views_do_not_divide_by_zero() {
        let mut jobs = FixtureSet::sample().jobs;
        for job in &mut jobs {
            job.views = 0;
        }
        let jobs: Vec<_> = jobs.into_iter().map(Arc::new).collect();
        let stats = job_stats(&jobs);
        assert_eq!(stats.conversion_rate, "0");
        assert_eq!(stats.average_applicants_per_job, "25.0");
    }
}
