use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::domain::{EmployerJob, JobDraft, JobId, JobListField, JobStatus, JobUpdate};
use crate::pipeline::StoreError;

/// Result of a job list mutation. Unknown ids and disallowed moves never error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobMutation {
    Applied,
    Unchanged,
    NotFound,
}

impl JobMutation {
    pub fn applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Employer job list. Every mutation swaps in a new `Arc` for the touched
/// posting only, so snapshots taken earlier stay valid and untouched entries
/// remain pointer-equal.
#[derive(Debug, Default)]
pub struct JobBoard {
    jobs: Vec<Arc<EmployerJob>>,
    sequence: u64,
    version: u64,
}

impl JobBoard {
    pub fn new(seed: impl IntoIterator<Item = EmployerJob>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        let mut jobs = Vec::new();
        for job in seed {
            if !seen.insert(job.id.clone()) {
                return Err(StoreError::DuplicateJob(job.id));
            }
            jobs.push(Arc::new(job));
        }

        Ok(Self {
            jobs,
            sequence: 0,
            version: 0,
        })
    }

    pub fn jobs(&self) -> &[Arc<EmployerJob>] {
        &self.jobs
    }

    pub fn snapshot(&self) -> Vec<Arc<EmployerJob>> {
        self.jobs.clone()
    }

    pub fn get(&self, id: &JobId) -> Option<Arc<EmployerJob>> {
        self.position(id).map(|index| self.jobs[index].clone())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn create_job(&mut self, draft: JobDraft) -> Arc<EmployerJob> {
        let id = self.next_job_id();
        let job = Arc::new(EmployerJob {
            id,
            title: draft.title,
            company: draft.company,
            location: draft.location,
            employment_type: draft.employment_type,
            salary: draft.salary,
            description: draft.description,
            status: JobStatus::Active,
            applicants: 0,
            views: 0,
            posted_date: draft.posted_date,
            requirements: non_blank(draft.requirements),
            responsibilities: non_blank(draft.responsibilities),
        });

        self.jobs.push(job.clone());
        self.version += 1;
        info!(job_id = %job.id, title = %job.title, "job posting created");
        job
    }

    pub fn update_job(&mut self, id: &JobId, update: &JobUpdate) -> JobMutation {
        self.replace_with(id, "update", |job| update.apply_to(job))
    }

    pub fn delete_job(&mut self, id: &JobId) -> JobMutation {
        match self.position(id) {
            Some(index) => {
                self.jobs.remove(index);
                self.version += 1;
                info!(job_id = %id, "job posting deleted");
                JobMutation::Applied
            }
            None => {
                debug!(job_id = %id, "delete ignored for unknown job");
                JobMutation::NotFound
            }
        }
    }

    /// Active postings only.
    pub fn pause_job(&mut self, id: &JobId) -> JobMutation {
        self.move_status(id, JobStatus::Paused, &[JobStatus::Active])
    }

    /// Paused postings only.
    pub fn resume_job(&mut self, id: &JobId) -> JobMutation {
        self.move_status(id, JobStatus::Active, &[JobStatus::Paused])
    }

    /// Closing is final.
    pub fn close_job(&mut self, id: &JobId) -> JobMutation {
        self.move_status(id, JobStatus::Closed, &[JobStatus::Active, JobStatus::Paused])
    }

    pub fn push_list_item(
        &mut self,
        id: &JobId,
        field: JobListField,
        value: impl Into<String>,
    ) -> JobMutation {
        let value = value.into().trim().to_string();
        self.replace_with(id, "append", |job| {
            if value.is_empty() {
                return None;
            }
            let mut patched = job.clone();
            patched.list_mut(field).push(value.clone());
            Some(patched)
        })
    }

    pub fn remove_list_item(&mut self, id: &JobId, field: JobListField, index: usize) -> JobMutation {
        self.replace_with(id, "remove", |job| {
            if index >= job.list(field).len() {
                return None;
            }
            let mut patched = job.clone();
            patched.list_mut(field).remove(index);
            Some(patched)
        })
    }

    pub fn record_view(&mut self, id: &JobId) -> JobMutation {
        self.replace_with(id, "view", |job| {
            let mut patched = job.clone();
            patched.views = job.views.saturating_add(1);
            (patched.views != job.views).then_some(patched)
        })
    }

    pub fn record_application(&mut self, id: &JobId) -> JobMutation {
        self.replace_with(id, "application", |job| {
            let mut patched = job.clone();
            patched.applicants = job.applicants.saturating_add(1);
            (patched.applicants != job.applicants).then_some(patched)
        })
    }

    fn move_status(&mut self, id: &JobId, target: JobStatus, from: &[JobStatus]) -> JobMutation {
        self.replace_with(id, target.as_str(), |job| {
            from.contains(&job.status).then(|| job.with_status(target))
        })
    }

    fn replace_with<F>(&mut self, id: &JobId, action: &str, patch: F) -> JobMutation
    where
        F: FnOnce(&EmployerJob) -> Option<EmployerJob>,
    {
        let Some(index) = self.position(id) else {
            debug!(job_id = %id, action, "job mutation ignored for unknown job");
            return JobMutation::NotFound;
        };

        match patch(self.jobs[index].as_ref()) {
            Some(patched) => {
                self.jobs[index] = Arc::new(patched);
                self.version += 1;
                info!(job_id = %id, action, "job posting updated");
                JobMutation::Applied
            }
            None => {
                debug!(job_id = %id, action, status = %self.jobs[index].status, "job mutation had no effect");
                JobMutation::Unchanged
            }
        }
    }

    fn position(&self, id: &JobId) -> Option<usize> {
        self.jobs.iter().position(|job| &job.id == id)
    }

    fn next_job_id(&mut self) -> JobId {
        loop {
            self.sequence += 1;
            let candidate = JobId(format!("job-{:06}", self.sequence));
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::FixtureSet;
    use crate::pipeline::jobs::EmploymentType;

    fn board() -> JobBoard {
        JobBoard::new(FixtureSet::sample().jobs).expect("sample jobs have unique ids")
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: "Platform Engineer".to_string(),
            company: "Northwind Labs".to_string(),
            location: "Remote".to_string(),
            employment_type: EmploymentType::FullTime,
            salary: Some("$140k - $160k".to_string()),
            description: "Own the deployment pipeline.".to_string(),
            posted_date: "Just now".to_string(),
            requirements: vec!["Rust".to_string(), "   ".to_string()],
            responsibilities: Vec::new(),
        }
    }

    #[test]
    fn rejects_duplicate_seed_ids() {
        let mut jobs = FixtureSet::sample().jobs;
        jobs.push(jobs[0].clone());
        match JobBoard::new(jobs) {
            Err(StoreError::DuplicateJob(id)) => assert_eq!(id, JobId::from("job-1")),
            other => panic!("expected duplicate job error, got {other:?}"),
        }
    }

    #[test]
    fn create_assigns_fresh_ids_and_active_status() {
        let mut board = board();
        let before = board.jobs().len();
        let job = board.create_job(draft());

        assert_eq!(job.id, JobId::from("job-000001"));
        assert_eq!(job.status, JobStatus::Active);
        assert_eq!(job.applicants, 0);
        assert_eq!(job.requirements, vec!["Rust".to_string()]);
        assert_eq!(board.jobs().len(), before + 1);
        assert_eq!(board.create_job(draft()).id, JobId::from("job-000002"));
    }

    #[test]
    fn lifecycle_moves_follow_allowed_sources() {
        let mut board = board();
        let id = JobId::from("job-1");

        assert_eq!(board.resume_job(&id), JobMutation::Unchanged);
        assert_eq!(board.pause_job(&id), JobMutation::Applied);
        assert_eq!(board.pause_job(&id), JobMutation::Unchanged);
        assert_eq!(board.resume_job(&id), JobMutation::Applied);
        assert_eq!(board.close_job(&id), JobMutation::Applied);
        assert_eq!(board.resume_job(&id), JobMutation::Unchanged);
        assert_eq!(board.close_job(&id), JobMutation::Unchanged);
        assert_eq!(board.get(&id).expect("job present").status, JobStatus::Closed);
    }

    #[test]
    fn missing_ids_leave_the_list_untouched() {
        let mut board = board();
        let before = board.snapshot();
        let missing = JobId::from("job-missing");

        assert_eq!(board.pause_job(&missing), JobMutation::NotFound);
        assert_eq!(board.delete_job(&missing), JobMutation::NotFound);
        assert_eq!(
            board.update_job(&missing, &JobUpdate::default()),
            JobMutation::NotFound
        );
        assert_eq!(board.version(), 0);
        assert!(before
            .iter()
            .zip(board.jobs())
            .all(|(left, right)| Arc::ptr_eq(left, right)));
    }

    #[test]
    fn update_replaces_only_the_target() {
        let mut board = board();
        let before = board.snapshot();
        let update = JobUpdate {
            title: Some("Staff Software Engineer".to_string()),
            ..JobUpdate::default()
        };

        assert_eq!(board.update_job(&JobId::from("job-1"), &update), JobMutation::Applied);
        assert_eq!(board.jobs()[0].title, "Staff Software Engineer");
        assert_eq!(before[0].title, "Senior Software Engineer");
        assert!(before[1..]
            .iter()
            .zip(&board.jobs()[1..])
            .all(|(left, right)| Arc::ptr_eq(left, right)));

        assert_eq!(board.update_job(&JobId::from("job-1"), &update), JobMutation::Unchanged);
    }

    #[test]
    fn salary_can_be_cleared_with_explicit_null() {
        let mut board = board();
        let id = JobId::from("job-1");

        let untouched: JobUpdate =
            serde_json::from_str(r#"{"title": "Lead Engineer"}"#).expect("update parses");
        assert_eq!(untouched.salary, None);
        assert_eq!(board.update_job(&id, &untouched), JobMutation::Applied);
        assert!(board.get(&id).expect("job").salary.is_some());

        let cleared: JobUpdate =
            serde_json::from_str(r#"{"salary": null}"#).expect("update parses");
        assert_eq!(cleared.salary, Some(None));
        assert_eq!(board.update_job(&id, &cleared), JobMutation::Applied);
        assert_eq!(board.get(&id).expect("job").salary, None);
        assert_eq!(board.update_job(&id, &cleared), JobMutation::Unchanged);
    }

    #[test]
    fn list_items_append_and_remove_by_index() {
        let mut board = board();
        let id = JobId::from("job-2");
        let original = board.get(&id).expect("job").responsibilities.len();

        assert_eq!(
            board.push_list_item(&id, JobListField::Responsibilities, "Run design critiques"),
            JobMutation::Applied
        );
        assert_eq!(
            board.push_list_item(&id, JobListField::Responsibilities, "  "),
            JobMutation::Unchanged
        );
        let job = board.get(&id).expect("job");
        assert_eq!(job.responsibilities.len(), original + 1);
        assert_eq!(
            job.responsibilities.last().map(String::as_str),
            Some("Run design critiques")
        );

        assert_eq!(
            board.remove_list_item(&id, JobListField::Requirements, 99),
            JobMutation::Unchanged
        );
        assert_eq!(
            board.remove_list_item(&id, JobListField::Requirements, 0),
            JobMutation::Applied
        );
    }

    #[test]
    fn counters_only_grow() {
        let mut board = board();
        let id = JobId::from("job-3");
        let before = board.get(&id).expect("job");

        board.record_view(&id);
        board.record_view(&id);
        board.record_application(&id);

        let after = board.get(&id).expect("job");
        assert_eq!(after.views, before.views + 2);
        assert_eq!(after.applicants, before.applicants + 1);
    }

    #[test]
    fn delete_removes_the_posting() {
        let mut board = board();
        assert!(board.delete_job(&JobId::from("job-4")).applied());
        assert!(board.get(&JobId::from("job-4")).is_none());
        assert_eq!(board.version(), 1);
    }
}
