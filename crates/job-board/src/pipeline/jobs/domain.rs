use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pipeline::query::Filterable;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Publication state of an employer posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Paused,
    Closed,
}

impl JobStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Active, Self::Paused, Self::Closed]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Closed => "closed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Closed => "Closed",
        }
    }

    /// Whether job seekers may still apply.
    pub const fn accepts_applications(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status '{0}'")]
pub struct ParseJobStatusError(pub String);

impl FromStr for JobStatus {
    type Err = ParseJobStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseJobStatusError(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Remote => "Remote",
        }
    }
}

/// A posting owned by an employer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerJob {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: EmploymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: String,
    pub status: JobStatus,
    /// Grows only, via `JobBoard::record_application`.
    #[serde(default)]
    pub applicants: u32,
    /// Grows only, via `JobBoard::record_view`.
    #[serde(default)]
    pub views: u32,
    pub posted_date: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl EmployerJob {
    pub(crate) fn with_status(&self, status: JobStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub(crate) fn list(&self, field: JobListField) -> &Vec<String> {
        match field {
            JobListField::Requirements => &self.requirements,
            JobListField::Responsibilities => &self.responsibilities,
        }
    }

    pub(crate) fn list_mut(&mut self, field: JobListField) -> &mut Vec<String> {
        match field {
            JobListField::Requirements => &mut self.requirements,
            JobListField::Responsibilities => &mut self.responsibilities,
        }
    }
}

impl Filterable for EmployerJob {
    type Status = JobStatus;

    fn status(&self) -> JobStatus {
        self.status
    }

    fn secondary_key(&self) -> &str {
        &self.company
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.company.as_str(),
            self.location.as_str(),
        ]
    }
}

/// Employer input for a new posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: String,
    pub posted_date: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// Field-level patch applied by `JobBoard::update_job`; `None` leaves a field untouched.
/// `salary` can also be cleared: an explicit JSON `null` arrives as `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<Option<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns the patched job, or `None` when nothing would change.
    pub(crate) fn apply_to(&self, job: &EmployerJob) -> Option<EmployerJob> {
        let mut patched = job.clone();
        if let Some(title) = &self.title {
            patched.title = title.clone();
        }
        if let Some(company) = &self.company {
            patched.company = company.clone();
        }
        if let Some(location) = &self.location {
            patched.location = location.clone();
        }
        if let Some(employment_type) = self.employment_type {
            patched.employment_type = employment_type;
        }
        if let Some(salary) = &self.salary {
            patched.salary = salary.clone();
        }
        if let Some(description) = &self.description {
            patched.description = description.clone();
        }

        (patched != *job).then_some(patched)
    }
}

/// Ordered, user-editable lists on a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobListField {
    Requirements,
    Responsibilities,
}
