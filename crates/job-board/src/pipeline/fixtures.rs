//! Seed data for the stores. Nothing here is global: callers build a
//! [`FixtureSet`] and hand its vectors to the store constructors.

use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::applicants::{ApplicationId, ApplicationRecord, ApplicationStatus, MatchScore};
use super::jobs::{EmployerJob, EmploymentType, JobId, JobStatus};

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    InvalidRow { row: usize, reason: String },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Io(err) => write!(f, "failed to read fixture: {}", err),
            FixtureError::Json(err) => write!(f, "invalid fixture JSON: {}", err),
            FixtureError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
            FixtureError::InvalidRow { row, reason } => {
                write!(f, "applicant CSV row {} rejected: {}", row, reason)
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Io(err) => Some(err),
            FixtureError::Json(err) => Some(err),
            FixtureError::Csv(err) => Some(err),
            FixtureError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for FixtureError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for FixtureError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Applicants and postings used to seed a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    pub applicants: Vec<ApplicationRecord>,
    #[serde(default)]
    pub jobs: Vec<EmployerJob>,
}

impl FixtureSet {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, FixtureError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Built-in demo board: eight applicants across four postings.
    pub fn sample() -> Self {
        Self {
            applicants: sample_applicants(),
            jobs: sample_jobs(),
        }
    }
}

/// Import applicants from a CSV export with snake_case headers. Skills are
/// `;`-separated; blank optional cells are treated as absent.
pub fn applicants_from_csv_reader<R: Read>(
    reader: R,
) -> Result<Vec<ApplicationRecord>, FixtureError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (offset, row) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
        // Header is row 1.
        records.push(row?.into_record(offset + 2)?);
    }

    Ok(records)
}

pub fn applicants_from_csv_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ApplicationRecord>, FixtureError> {
    let file = std::fs::File::open(path)?;
    applicants_from_csv_reader(file)
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    position: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    job_id: String,
    job_title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    match_score: u8,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    applied_date: Option<String>,
}

impl ApplicantRow {
    fn into_record(self, row: usize) -> Result<ApplicationRecord, FixtureError> {
        let status = match self.status.as_deref() {
            Some(raw) => raw
                .parse::<ApplicationStatus>()
                .map_err(|err| FixtureError::InvalidRow {
                    row,
                    reason: err.to_string(),
                })?,
            None => ApplicationStatus::Pending,
        };
        let match_score =
            MatchScore::new(self.match_score).map_err(|err| FixtureError::InvalidRow {
                row,
                reason: err.to_string(),
            })?;
        let skills = self
            .skills
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|skill| !skill.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ApplicationRecord {
            id: ApplicationId(self.id),
            name: self.name,
            email: self.email.unwrap_or_default(),
            position: self.position,
            location: self.location.unwrap_or_default(),
            experience: self.experience.unwrap_or_default(),
            job_id: JobId(self.job_id),
            job_title: self.job_title,
            status,
            match_score,
            skills,
            applied_date: self.applied_date.unwrap_or_default(),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[allow(clippy::too_many_arguments)]
fn applicant(
    id: &str,
    name: &str,
    position: &str,
    location: &str,
    experience: &str,
    job: (&str, &str),
    status: ApplicationStatus,
    score: u8,
    skills: &[&str],
    applied_date: &str,
) -> ApplicationRecord {
    let (job_id, job_title) = job;
    ApplicationRecord {
        id: ApplicationId::from(id),
        name: name.to_string(),
        email: format!(
            "{}@example.com",
            name.to_ascii_lowercase().replace(' ', ".")
        ),
        position: position.to_string(),
        location: location.to_string(),
        experience: experience.to_string(),
        job_id: JobId::from(job_id),
        job_title: job_title.to_string(),
        status,
        match_score: MatchScore::saturating(score),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        applied_date: applied_date.to_string(),
    }
}

const SOFTWARE_ENGINEER: (&str, &str) = ("job-1", "Senior Software Engineer");
const PRODUCT_DESIGNER: (&str, &str) = ("job-2", "Product Designer");
const DATA_ANALYST: (&str, &str) = ("job-3", "Data Analyst");
const MARKETING_MANAGER: (&str, &str) = ("job-4", "Marketing Manager");

fn sample_applicants() -> Vec<ApplicationRecord> {
    use ApplicationStatus::*;

    vec![
        applicant(
            "app-1",
            "Sarah Johnson",
            "Senior Frontend Developer",
            "San Francisco, CA",
            "6 years",
            SOFTWARE_ENGINEER,
            Pending,
            92,
            &["React", "TypeScript", "Node.js"],
            "2 days ago",
        ),
        applicant(
            "app-2",
            "Michael Chen",
            "Full Stack Engineer",
            "Seattle, WA",
            "5 years",
            SOFTWARE_ENGINEER,
            Shortlisted,
            88,
            &["Python", "Django", "React"],
            "3 days ago",
        ),
        applicant(
            "app-3",
            "Emily Rodriguez",
            "UX Designer",
            "Austin, TX",
            "4 years",
            PRODUCT_DESIGNER,
            Interview,
            85,
            &["Figma", "User Research", "Prototyping"],
            "5 days ago",
        ),
        applicant(
            "app-4",
            "David Kim",
            "Backend Engineer",
            "New York, NY",
            "3 years",
            SOFTWARE_ENGINEER,
            Rejected,
            67,
            &["Go", "PostgreSQL", "Docker"],
            "1 week ago",
        ),
        applicant(
            "app-5",
            "Jessica Patel",
            "Data Scientist",
            "Boston, MA",
            "7 years",
            DATA_ANALYST,
            Hired,
            90,
            &["Python", "SQL", "Tableau"],
            "2 weeks ago",
        ),
        applicant(
            "app-6",
            "James Wilson",
            "Visual Designer",
            "Denver, CO",
            "2 years",
            PRODUCT_DESIGNER,
            Pending,
            78,
            &["Sketch", "Illustration"],
            "1 day ago",
        ),
        applicant(
            "app-7",
            "Olivia Martinez",
            "Software Developer",
            "Chicago, IL",
            "4 years",
            SOFTWARE_ENGINEER,
            Shortlisted,
            81,
            &["Java", "Spring", "AWS"],
            "4 days ago",
        ),
        applicant(
            "app-8",
            "Daniel Brown",
            "Marketing Specialist",
            "Miami, FL",
            "5 years",
            MARKETING_MANAGER,
            Reviewed,
            73,
            &["SEO", "Content Strategy", "Analytics"],
            "6 days ago",
        ),
    ]
}

fn sample_jobs() -> Vec<EmployerJob> {
    vec![
        EmployerJob {
            id: JobId::from(SOFTWARE_ENGINEER.0),
            title: SOFTWARE_ENGINEER.1.to_string(),
            company: "TechCorp Inc.".to_string(),
            location: "San Francisco, CA".to_string(),
            employment_type: EmploymentType::FullTime,
            salary: Some("$120k - $160k".to_string()),
            description: "Build and scale the core product platform.".to_string(),
            status: JobStatus::Active,
            applicants: 45,
            views: 320,
            posted_date: "2 days ago".to_string(),
            requirements: vec![
                "5+ years of software development".to_string(),
                "Experience with React and Node.js".to_string(),
            ],
            responsibilities: vec![
                "Design and ship product features".to_string(),
                "Mentor junior engineers".to_string(),
            ],
        },
        EmployerJob {
            id: JobId::from(PRODUCT_DESIGNER.0),
            title: PRODUCT_DESIGNER.1.to_string(),
            company: "TechCorp Inc.".to_string(),
            location: "Remote".to_string(),
            employment_type: EmploymentType::Remote,
            salary: Some("$90k - $120k".to_string()),
            description: "Own the end-to-end design of the mobile app.".to_string(),
            status: JobStatus::Active,
            applicants: 28,
            views: 250,
            posted_date: "5 days ago".to_string(),
            requirements: vec![
                "Portfolio of shipped mobile work".to_string(),
                "Fluency in Figma".to_string(),
            ],
            responsibilities: vec!["Lead user research sessions".to_string()],
        },
        EmployerJob {
            id: JobId::from(DATA_ANALYST.0),
            title: DATA_ANALYST.1.to_string(),
            company: "DataWorks".to_string(),
            location: "Boston, MA".to_string(),
            employment_type: EmploymentType::Contract,
            salary: None,
            description: "Turn product telemetry into weekly insight reports.".to_string(),
            status: JobStatus::Paused,
            applicants: 15,
            views: 230,
            posted_date: "1 week ago".to_string(),
            requirements: vec!["Strong SQL".to_string()],
            responsibilities: vec!["Maintain KPI dashboards".to_string()],
        },
        EmployerJob {
            id: JobId::from(MARKETING_MANAGER.0),
            title: MARKETING_MANAGER.1.to_string(),
            company: "Brightline Media".to_string(),
            location: "Miami, FL".to_string(),
            employment_type: EmploymentType::FullTime,
            salary: Some("$85k - $100k".to_string()),
            description: "Run acquisition campaigns across paid channels.".to_string(),
            status: JobStatus::Closed,
            applicants: 12,
            views: 200,
            posted_date: "3 weeks ago".to_string(),
            requirements: Vec::new(),
            responsibilities: Vec::new(),
        },
    ]
}
