use crate::demo::{
    run_applicant_list, run_applicant_stats, run_dashboard, run_demo, run_job_list,
    ApplicantListArgs, BoardArgs, DemoArgs, JobListArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board",
    about = "Run the job board API or inspect applicants and postings from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the applicant pipeline
    Applicants {
        #[command(subcommand)]
        command: ApplicantsCommand,
    },
    /// Inspect employer job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Print the employer dashboard tiles
    Dashboard(BoardArgs),
    /// Walk through an employer and seeker session against the sample board
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicantsCommand {
    /// List applicants narrowed by status tab, search text, and job
    List(ApplicantListArgs),
    /// Print per-status counts and the hire rate
    Stats(BoardArgs),
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// List postings narrowed by status, search text, and company
    List(JobListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed applicants from a CSV export instead of the fixture set
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Applicants {
            command: ApplicantsCommand::List(args),
        } => run_applicant_list(args),
        Command::Applicants {
            command: ApplicantsCommand::Stats(args),
        } => run_applicant_stats(args),
        Command::Jobs {
            command: JobsCommand::List(args),
        } => run_job_list(args),
        Command::Dashboard(args) => run_dashboard(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
