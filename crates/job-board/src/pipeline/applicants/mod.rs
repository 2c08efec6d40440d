//! Applicant tracking for the employer dashboard: application records, the
//! status lifecycle, the canonical record store, and summary aggregates.

pub mod domain;
pub mod stats;
pub mod store;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, InvalidMatchScore, MatchScore,
    ParseStatusError,
};
pub use stats::{applicant_stats, tab_counts, ApplicantStats, TabCount};
pub use store::{ApplicantStore, StatusUpdate};
pub use transitions::{ParsePolicyError, TransitionPolicy};
