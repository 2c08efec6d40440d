use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::applicants::{
    tab_counts, ApplicantStore, ApplicationId, ApplicationRecord, ApplicationStatus,
    StatusUpdate, TabCount, TransitionPolicy,
};
use super::dashboard::DashboardSummary;
use super::fixtures::{FixtureError, FixtureSet};
use super::jobs::{
    EmployerJob, JobBoard, JobDraft, JobId, JobListField, JobMutation, JobStatus, JobUpdate,
};
use super::query::{self, count_for_tab, FilterCriteria, MemoizedFilter, Tab};
use super::seeker::{ApplyError, SeekerSession, SubmittedApplication};
use super::StoreError;
use crate::config::BoardConfig;

/// Filtered applicant list together with the tab badge row.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantListing {
    pub tabs: Vec<TabCount>,
    pub count: usize,
    pub applicants: Vec<ApplicationRecord>,
}

/// Filtered posting list with per-status badge counts.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    pub all: usize,
    pub active: usize,
    pub paused: usize,
    pub closed: usize,
    pub count: usize,
    pub jobs: Vec<EmployerJob>,
}

#[derive(Debug, thiserror::Error)]
pub enum BoardServiceError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum SeekerApplyError {
    #[error("job {0} not found")]
    UnknownJob(JobId),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

struct ApplicantDesk {
    store: ApplicantStore,
    filter: MemoizedFilter<ApplicationRecord>,
}

/// Shared handle over the applicant store, the job board, and one seeker
/// session. Each store sits behind its own lock and every read hands back an
/// owned snapshot.
pub struct BoardService {
    applicants: Mutex<ApplicantDesk>,
    jobs: Mutex<JobBoard>,
    seeker: tokio::sync::Mutex<SeekerSession>,
}

impl BoardService {
    pub fn new(
        fixtures: FixtureSet,
        policy: TransitionPolicy,
        apply_latency: Duration,
    ) -> Result<Self, StoreError> {
        let store = ApplicantStore::new(fixtures.applicants, policy)?;
        let jobs = JobBoard::new(fixtures.jobs)?;

        Ok(Self {
            applicants: Mutex::new(ApplicantDesk {
                store,
                filter: MemoizedFilter::new(),
            }),
            jobs: Mutex::new(jobs),
            seeker: tokio::sync::Mutex::new(SeekerSession::new(apply_latency)),
        })
    }

    /// Seed from the configured fixture file, or the built-in sample set.
    pub fn from_config(config: &BoardConfig) -> Result<Self, BoardServiceError> {
        let fixtures = match &config.fixtures_path {
            Some(path) => FixtureSet::from_json_path(path)?,
            None => FixtureSet::sample(),
        };
        Ok(Self::new(
            fixtures,
            config.transition_policy,
            config.apply_latency,
        )?)
    }

    pub fn policy(&self) -> TransitionPolicy {
        lock(&self.applicants).store.policy()
    }

    pub fn list_applicants(&self, criteria: &FilterCriteria<ApplicationStatus>) -> ApplicantListing {
        let mut desk = lock(&self.applicants);
        let ApplicantDesk { store, filter } = &mut *desk;
        let tabs = tab_counts(store.records());
        let applicants: Vec<ApplicationRecord> = filter
            .get(store.version(), store.records(), criteria)
            .iter()
            .map(|record| record.as_ref().clone())
            .collect();

        ApplicantListing {
            tabs,
            count: applicants.len(),
            applicants,
        }
    }

    pub fn applicant(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        lock(&self.applicants)
            .store
            .get(id)
            .map(|record| record.as_ref().clone())
    }

    /// `None` when the id is unknown.
    pub fn applicant_actions(&self, id: &ApplicationId) -> Option<Vec<ApplicationStatus>> {
        let desk = lock(&self.applicants);
        desk.store
            .get(id)
            .map(|record| desk.store.policy().actions_for(record.status))
    }

    pub fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> StatusUpdate {
        lock(&self.applicants).store.update_status(id, status)
    }

    pub fn advance(&self, id: &ApplicationId) -> StatusUpdate {
        lock(&self.applicants).store.advance(id)
    }

    pub fn list_jobs(&self, criteria: &FilterCriteria<JobStatus>) -> JobListing {
        let board = lock(&self.jobs);
        let jobs = board.jobs();
        let filtered: Vec<EmployerJob> = query::filter(jobs, criteria)
            .iter()
            .map(|job| job.as_ref().clone())
            .collect();

        JobListing {
            all: count_for_tab(jobs, Tab::All),
            active: count_for_tab(jobs, Tab::Only(JobStatus::Active)),
            paused: count_for_tab(jobs, Tab::Only(JobStatus::Paused)),
            closed: count_for_tab(jobs, Tab::Only(JobStatus::Closed)),
            count: filtered.len(),
            jobs: filtered,
        }
    }

    pub fn job(&self, id: &JobId) -> Option<EmployerJob> {
        lock(&self.jobs).get(id).map(|job| job.as_ref().clone())
    }

    pub fn create_job(&self, draft: JobDraft) -> EmployerJob {
        lock(&self.jobs).create_job(draft).as_ref().clone()
    }

    pub fn update_job(&self, id: &JobId, update: &JobUpdate) -> JobMutation {
        lock(&self.jobs).update_job(id, update)
    }

    pub fn delete_job(&self, id: &JobId) -> JobMutation {
        lock(&self.jobs).delete_job(id)
    }

    pub fn pause_job(&self, id: &JobId) -> JobMutation {
        lock(&self.jobs).pause_job(id)
    }

    pub fn resume_job(&self, id: &JobId) -> JobMutation {
        lock(&self.jobs).resume_job(id)
    }

    pub fn close_job(&self, id: &JobId) -> JobMutation {
        lock(&self.jobs).close_job(id)
    }

    pub fn push_list_item(&self, id: &JobId, field: JobListField, value: String) -> JobMutation {
        lock(&self.jobs).push_list_item(id, field, value)
    }

    pub fn remove_list_item(&self, id: &JobId, field: JobListField, index: usize) -> JobMutation {
        lock(&self.jobs).remove_list_item(id, field, index)
    }

    /// Seeker detail view. Counts the view before returning the posting.
    pub fn view_job(&self, id: &JobId) -> Option<EmployerJob> {
        let mut board = lock(&self.jobs);
        if board.record_view(id) == JobMutation::NotFound {
            return None;
        }
        board.get(id).map(|job| job.as_ref().clone())
    }

    /// Seeker submission. The posting's applicant counter is bumped once the
    /// simulated round trip completes.
    pub async fn apply(&self, job_id: &JobId) -> Result<SubmittedApplication, SeekerApplyError> {
        let job = lock(&self.jobs)
            .get(job_id)
            .ok_or_else(|| SeekerApplyError::UnknownJob(job_id.clone()))?;

        let receipt = self.seeker.lock().await.apply(&job).await?;
        lock(&self.jobs).record_application(job_id);
        Ok(receipt)
    }

    /// Posting list as the seeker sees it, optionally narrowed to saved jobs.
    pub async fn browse_jobs(
        &self,
        criteria: &FilterCriteria<JobStatus>,
        saved_only: bool,
    ) -> Vec<EmployerJob> {
        let jobs = lock(&self.jobs).snapshot();
        self.seeker
            .lock()
            .await
            .browse(&jobs, criteria, saved_only)
            .iter()
            .map(|job| job.as_ref().clone())
            .collect()
    }

    pub async fn toggle_saved(&self, job_id: &JobId) -> bool {
        self.seeker.lock().await.toggle_saved(job_id)
    }

    pub async fn seeker_applications(&self) -> Vec<SubmittedApplication> {
        self.seeker.lock().await.applications().cloned().collect()
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let jobs = lock(&self.jobs).snapshot();
        let applicants = lock(&self.applicants).store.snapshot();
        DashboardSummary::compute(&jobs, &applicants)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
