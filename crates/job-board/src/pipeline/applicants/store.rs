use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};
use super::transitions::TransitionPolicy;
use crate::pipeline::StoreError;

/// What `update_status` did. Purely informational: callers that treat the
/// mutation as fire-and-forget can drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StatusUpdate {
    Applied {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    /// The record already had the requested status.
    Unchanged,
    NotFound,
    /// The active policy does not allow this move.
    Refused {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

impl StatusUpdate {
    pub fn applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Canonical in-memory applicant list for one employer dashboard.
///
/// Records live behind `Arc` in insertion order with an id index on the side.
/// A status change swaps in a fresh `Arc` for the target alone, so snapshots
/// handed out earlier are never mutated and untouched records stay
/// pointer-equal.
#[derive(Debug)]
pub struct ApplicantStore {
    records: Vec<Arc<ApplicationRecord>>,
    index: HashMap<ApplicationId, usize>,
    policy: TransitionPolicy,
    version: u64,
}

impl ApplicantStore {
    pub fn new(
        seed: impl IntoIterator<Item = ApplicationRecord>,
        policy: TransitionPolicy,
    ) -> Result<Self, StoreError> {
        let mut records = Vec::new();
        let mut index = HashMap::new();

        for record in seed {
            if index.contains_key(&record.id) {
                return Err(StoreError::DuplicateApplication(record.id));
            }
            index.insert(record.id.clone(), records.len());
            records.push(Arc::new(record));
        }

        Ok(Self {
            records,
            index,
            policy,
            version: 0,
        })
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn records(&self) -> &[Arc<ApplicationRecord>] {
        &self.records
    }

    pub fn snapshot(&self) -> Vec<Arc<ApplicationRecord>> {
        self.records.clone()
    }

    pub fn get(&self, id: &ApplicationId) -> Option<Arc<ApplicationRecord>> {
        self.index.get(id).map(|position| self.records[*position].clone())
    }

    /// Bumped once per applied change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Status-change menu for one application, empty when the id is unknown.
    pub fn actions_for(&self, id: &ApplicationId) -> Vec<ApplicationStatus> {
        self.get(id)
            .map(|record| self.policy.actions_for(record.status))
            .unwrap_or_default()
    }

    pub fn update_status(&mut self, id: &ApplicationId, status: ApplicationStatus) -> StatusUpdate {
        let Some(&position) = self.index.get(id) else {
            debug!(application_id = %id, %status, "status update ignored for unknown application");
            return StatusUpdate::NotFound;
        };

        let current = &self.records[position];
        let from = current.status;
        if from == status {
            return StatusUpdate::Unchanged;
        }

        if !self.policy.allows(from, status) {
            warn!(application_id = %id, %from, to = %status, policy = %self.policy, "status transition refused");
            return StatusUpdate::Refused { from, to: status };
        }

        let updated = Arc::new(current.with_status(status));
        self.records[position] = updated;
        self.version += 1;
        info!(application_id = %id, %from, to = %status, "application status updated");
        StatusUpdate::Applied { from, to: status }
    }

    /// Employer primary action: one step along the canonical path.
    pub fn advance(&mut self, id: &ApplicationId) -> StatusUpdate {
        match self.get(id) {
            Some(record) => match record.status.next_stage() {
                Some(next) => self.update_status(id, next),
                None => StatusUpdate::Unchanged,
            },
            None => {
                debug!(application_id = %id, "advance ignored for unknown application");
                StatusUpdate::NotFound
            }
        }
    }
}
