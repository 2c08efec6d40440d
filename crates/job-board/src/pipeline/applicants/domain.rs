use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pipeline::jobs::JobId;
use crate::pipeline::query::Filterable;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Where an application sits in the hiring lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Interview,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    /// Lifecycle order, also the order of the dashboard tab row.
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Pending,
            Self::Reviewed,
            Self::Shortlisted,
            Self::Interview,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Shortlisted => "shortlisted",
            Self::Interview => "interview",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Shortlisted => "Shortlisted",
            Self::Interview => "Interview",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for ApplicationStatus {
    type Err = ParseStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError(raw.to_string()))
    }
}

/// Percentage fit between an applicant and the posting, fixed at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MatchScore(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("match score must be between 0 and 100 (found {0})")]
pub struct InvalidMatchScore(pub u8);

impl MatchScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, InvalidMatchScore> {
        if value > Self::MAX {
            return Err(InvalidMatchScore(value));
        }
        Ok(Self(value))
    }

    /// Clamps out-of-range input to [`MatchScore::MAX`].
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MatchScore {
    type Error = InvalidMatchScore;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatchScore> for u8 {
    fn from(score: MatchScore) -> Self {
        score.0
    }
}

/// One applicant's application to one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
    pub job_id: JobId,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub match_score: MatchScore,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Display string only; lists keep insertion order rather than sorting on it.
    pub applied_date: String,
}

impl ApplicationRecord {
    /// Shallow copy carrying a new status; every other field is shared verbatim.
    pub fn with_status(&self, status: ApplicationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

impl Filterable for ApplicationRecord {
    type Status = ApplicationStatus;

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn secondary_key(&self) -> &str {
        self.job_id.as_str()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.position.as_str(),
            self.job_title.as_str(),
        ];
        fields.extend(self.skills.iter().map(String::as_str));
        fields
    }
}
