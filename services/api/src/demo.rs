use crate::infra::{load_board, parse_tab};
use clap::Args;
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::pipeline::applicants::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicantStats, StatusUpdate, TabCount,
    TransitionPolicy,
};
use job_board::pipeline::jobs::{EmployerJob, JobId, JobStatus, JobStats};
use job_board::pipeline::query::{FilterCriteria, Scope, Tab};
use job_board::pipeline::{BoardService, DashboardSummary, FixtureSet};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct BoardArgs {
    /// Seed applicants from a CSV export instead of the fixture set
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicantListArgs {
    /// Status tab (`all`, `pending`, `reviewed`, `shortlisted`, `interview`, `hired`, `rejected`)
    #[arg(long, default_value = "all", value_parser = parse_tab::<ApplicationStatus>)]
    pub(crate) status: Tab<ApplicationStatus>,
    /// Case-insensitive text matched against name, position, job title, and skills
    #[arg(long, default_value = "")]
    pub(crate) search: String,
    /// Restrict to one job id (`all` for every job)
    #[arg(long, default_value = "all")]
    pub(crate) job: String,
    #[command(flatten)]
    pub(crate) board: BoardArgs,
}

#[derive(Args, Debug)]
pub(crate) struct JobListArgs {
    /// Status tab (`all`, `active`, `paused`, `closed`)
    #[arg(long, default_value = "all", value_parser = parse_tab::<JobStatus>)]
    pub(crate) status: Tab<JobStatus>,
    /// Case-insensitive text matched against title, company, and location
    #[arg(long, default_value = "")]
    pub(crate) search: String,
    /// Restrict to one company (`all` for every company)
    #[arg(long, default_value = "all")]
    pub(crate) company: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Walk status changes through the guarded transition policy.
    #[arg(long)]
    pub(crate) guarded: bool,
    /// Skip the simulated submission delay in the seeker portion.
    #[arg(long)]
    pub(crate) no_delay: bool,
}

fn board(applicants_csv: Option<PathBuf>) -> Result<BoardService, AppError> {
    let config = AppConfig::load()?;
    load_board(&config.board, applicants_csv.as_deref())
}

pub(crate) fn run_applicant_list(args: ApplicantListArgs) -> Result<(), AppError> {
    let ApplicantListArgs {
        status,
        search,
        job,
        board: BoardArgs { applicants_csv },
    } = args;

    let service = board(applicants_csv)?;
    let criteria = FilterCriteria::new(status, search, Scope::from(job));
    let listing = service.list_applicants(&criteria);

    render_tab_row(&listing.tabs);
    println!(
        "{} applicant(s) matching tab '{}' search '{}'",
        listing.count, criteria.tab, criteria.search
    );
    for record in &listing.applicants {
        render_applicant(record);
    }
    Ok(())
}

pub(crate) fn run_applicant_stats(args: BoardArgs) -> Result<(), AppError> {
    let service = board(args.applicants_csv)?;
    render_applicant_stats(&service.dashboard().applicants);
    Ok(())
}

pub(crate) fn run_job_list(args: JobListArgs) -> Result<(), AppError> {
    let JobListArgs {
        status,
        search,
        company,
    } = args;

    let service = board(None)?;
    let listing = service.list_jobs(&FilterCriteria::new(status, search, Scope::from(company)));

    println!(
        "Postings: {} total | {} active | {} paused | {} closed",
        listing.all, listing.active, listing.paused, listing.closed
    );
    for job in &listing.jobs {
        render_job(job);
    }
    Ok(())
}

pub(crate) fn run_dashboard(args: BoardArgs) -> Result<(), AppError> {
    let service = board(args.applicants_csv)?;
    render_dashboard(&service.dashboard());
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { guarded, no_delay } = args;

    let policy = if guarded {
        TransitionPolicy::Guarded
    } else {
        TransitionPolicy::Permissive
    };
    let latency = if no_delay {
        Duration::ZERO
    } else {
        AppConfig::load()?.board.apply_latency
    };
    let service = BoardService::new(FixtureSet::sample(), policy, latency)?;

    println!("Job board demo ({policy} transitions)");
    render_dashboard(&service.dashboard());

    println!("\nShortlisted applicants");
    let shortlisted = FilterCriteria::new(
        Tab::Only(ApplicationStatus::Shortlisted),
        "",
        Scope::All,
    );
    for record in &service.list_applicants(&shortlisted).applicants {
        render_applicant(record);
    }

    println!("\nSearch 'software' across every job");
    let software = FilterCriteria::new(Tab::All, "software", Scope::All);
    for record in &service.list_applicants(&software).applicants {
        render_applicant(record);
    }

    let candidate = ApplicationId::from("app-1");
    println!("\nAdvancing {candidate} through the pipeline");
    loop {
        match service.advance(&candidate) {
            StatusUpdate::Applied { from, to } => {
                println!("  - {} -> {}", from.label(), to.label());
            }
            other => {
                println!("  - stopped: {}", describe_update(other));
                break;
            }
        }
    }

    let refused = service.update_status(&ApplicationId::from("app-5"), ApplicationStatus::Pending);
    println!(
        "Moving hired app-5 back to pending: {}",
        describe_update(refused)
    );
    let missing = service.update_status(&ApplicationId::from("app-99"), ApplicationStatus::Hired);
    println!("Updating unknown app-99: {}", describe_update(missing));

    println!("\nSeeker session");
    for id in ["job-2", "job-3"] {
        let id = JobId::from(id);
        match service.apply(&id).await {
            Ok(receipt) => println!(
                "  - applied to {} at {} ({})",
                receipt.job_title, receipt.company, receipt.applied_at
            ),
            Err(err) => println!("  - {err}"),
        }
    }

    println!();
    render_dashboard(&service.dashboard());
    Ok(())
}

fn describe_update(outcome: StatusUpdate) -> String {
    match outcome {
        StatusUpdate::Applied { from, to } => format!("applied ({from} -> {to})"),
        StatusUpdate::Unchanged => "no change".to_string(),
        StatusUpdate::NotFound => "ignored, no such application".to_string(),
        StatusUpdate::Refused { from, to } => format!("refused ({from} -> {to})"),
    }
}

fn render_tab_row(tabs: &[TabCount]) {
    let row: Vec<String> = tabs
        .iter()
        .map(|badge| format!("{} ({})", badge.label, badge.count))
        .collect();
    println!("{}", row.join(" | "));
}

fn render_applicant(record: &ApplicationRecord) {
    println!(
        "  - {} {} | {} | applied for {} ({}) | {} | match {}%",
        record.id,
        record.name,
        record.position,
        record.job_title,
        record.job_id,
        record.status.label(),
        record.match_score.value()
    );
    if !record.skills.is_empty() {
        println!("    skills: {}", record.skills.join(", "));
    }
}

fn render_job(job: &EmployerJob) {
    println!(
        "  - {} {} @ {} | {} | {} | {} applicants / {} views",
        job.id,
        job.title,
        job.company,
        job.location,
        job.status.label(),
        job.applicants,
        job.views
    );
}

fn render_applicant_stats(stats: &ApplicantStats) {
    println!("Applicants: {} total", stats.total);
    for status in ApplicationStatus::ordered() {
        println!("  - {}: {}", status.label(), stats.count(status));
    }
    println!("Hire rate: {}%", stats.hire_rate);
}

fn render_job_stats(stats: &JobStats) {
    println!(
        "Postings: {} total | {} applicants | {} views",
        stats.total_jobs, stats.total_applicants, stats.total_views
    );
    for (status, count) in &stats.by_status {
        println!("  - {}: {}", status.label(), count);
    }
    println!(
        "Avg applicants per job: {} | conversion rate: {}%",
        stats.average_applicants_per_job, stats.conversion_rate
    );
}

fn render_dashboard(summary: &DashboardSummary) {
    render_applicant_stats(&summary.applicants);
    render_job_stats(&summary.jobs);
}
