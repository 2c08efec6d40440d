//! Employer job postings: the posting list, its active/paused/closed
//! lifecycle, and the employer dashboard aggregates.

pub mod domain;
pub mod stats;
pub mod store;

pub use domain::{
    EmployerJob, EmploymentType, JobDraft, JobId, JobListField, JobStatus, JobUpdate,
    ParseJobStatusError,
};
pub use stats::{job_stats, JobStats};
pub use store::{JobBoard, JobMutation};
