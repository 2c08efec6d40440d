//! Job seeker side of the board: browsing postings, saved jobs, and
//! submitting applications.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::jobs::{EmployerJob, JobId, JobStatus};
use super::query::{self, FilterCriteria};

/// Receipt for an application sent from the seeker flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedApplication {
    pub job_id: JobId,
    pub job_title: String,
    pub company: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("job {job_id} is {status} and no longer accepts applications")]
    NotAccepting { job_id: JobId, status: JobStatus },
    #[error("already applied to job {0}")]
    AlreadyApplied(JobId),
}

/// Per-user state for the job seeker screens.
#[derive(Debug)]
pub struct SeekerSession {
    saved: BTreeSet<JobId>,
    applications: BTreeMap<JobId, SubmittedApplication>,
    latency: Duration,
}

impl SeekerSession {
    /// `latency` stands in for the network round trip of a real submission.
    pub fn new(latency: Duration) -> Self {
        Self {
            saved: BTreeSet::new(),
            applications: BTreeMap::new(),
            latency,
        }
    }

    /// Returns whether the job is saved after the toggle.
    pub fn toggle_saved(&mut self, job_id: &JobId) -> bool {
        if self.saved.remove(job_id) {
            false
        } else {
            self.saved.insert(job_id.clone());
            true
        }
    }

    pub fn is_saved(&self, job_id: &JobId) -> bool {
        self.saved.contains(job_id)
    }

    pub fn saved_jobs(&self) -> impl Iterator<Item = &JobId> {
        self.saved.iter()
    }

    pub fn has_applied(&self, job_id: &JobId) -> bool {
        self.applications.contains_key(job_id)
    }

    pub fn applications(&self) -> impl Iterator<Item = &SubmittedApplication> {
        self.applications.values()
    }

    /// Submit an application after the configured delay.
    pub async fn apply(&mut self, job: &EmployerJob) -> Result<SubmittedApplication, ApplyError> {
        if !job.status.accepts_applications() {
            return Err(ApplyError::NotAccepting {
                job_id: job.id.clone(),
                status: job.status,
            });
        }
        if self.has_applied(&job.id) {
            return Err(ApplyError::AlreadyApplied(job.id.clone()));
        }

        tokio::time::sleep(self.latency).await;

        let receipt = SubmittedApplication {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            applied_at: Utc::now(),
        };
        self.applications.insert(job.id.clone(), receipt.clone());
        info!(job_id = %job.id, "application submitted");
        Ok(receipt)
    }

    /// Job list as a seeker sees it: the shared filter engine plus a saved-only toggle.
    pub fn browse(
        &self,
        jobs: &[Arc<EmployerJob>],
        criteria: &FilterCriteria<JobStatus>,
        saved_only: bool,
    ) -> Vec<Arc<EmployerJob>> {
        query::filter(jobs, criteria)
            .into_iter()
            .filter(|job| !saved_only || self.is_saved(&job.id))
            .collect()
    }
}
