pub mod applicants;
pub mod dashboard;
pub mod fixtures;
pub mod jobs;
pub mod query;
pub mod router;
pub mod seeker;
pub mod service;

use applicants::ApplicationId;
use jobs::JobId;

pub use dashboard::DashboardSummary;
pub use fixtures::{FixtureError, FixtureSet};
pub use router::board_router;
pub use service::BoardService;

/// Seed validation failures raised when a store is constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("application id {0} appears more than once in the seed")]
    DuplicateApplication(ApplicationId),
    #[error("job id {0} appears more than once in the seed")]
    DuplicateJob(JobId),
}
