use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::domain::ApplicationStatus;

impl ApplicationStatus {
    /// Hired and rejected applications leave the pipeline.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }

    /// Canonical next step, used by the employer's primary action.
    pub const fn next_stage(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Reviewed),
            Self::Reviewed => Some(Self::Shortlisted),
            Self::Shortlisted => Some(Self::Interview),
            Self::Interview => Some(Self::Hired),
            Self::Hired | Self::Rejected => None,
        }
    }

    /// Legal successors under the guarded policy: the next stage, or rejection.
    pub fn successors(self) -> Vec<Self> {
        match self.next_stage() {
            Some(next) => vec![next, Self::Rejected],
            None => Vec::new(),
        }
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        self.successors().contains(&next)
    }
}

/// How strictly status changes are checked before they reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may be set from any other.
    #[default]
    Permissive,
    /// Only the canonical successors are accepted.
    Guarded,
}

impl TransitionPolicy {
    pub fn allows(self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Guarded => from == to || from.can_transition_to(to),
        }
    }

    /// Entries of the status-change menu for an application in `current`.
    pub fn actions_for(self, current: ApplicationStatus) -> Vec<ApplicationStatus> {
        match self {
            Self::Permissive => ApplicationStatus::ordered()
                .into_iter()
                .filter(|status| *status != current)
                .collect(),
            Self::Guarded => current.successors(),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => f.write_str("permissive"),
            Self::Guarded => f.write_str("guarded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transition policy '{0}'")]
pub struct ParsePolicyError(pub String);

impl FromStr for TransitionPolicy {
    type Err = ParsePolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "guarded" => Ok(Self::Guarded),
            _ => Err(ParsePolicyError(raw.to_string())),
        }
    }
}
