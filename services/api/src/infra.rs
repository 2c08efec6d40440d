use job_board::config::BoardConfig;
use job_board::error::AppError;
use job_board::pipeline::fixtures::applicants_from_csv_path;
use job_board::pipeline::query::Tab;
use job_board::pipeline::{BoardService, FixtureSet};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seed the board from configuration, replacing the applicant list with a CSV
/// export when one is given.
pub(crate) fn load_board(
    config: &BoardConfig,
    applicants_csv: Option<&Path>,
) -> Result<BoardService, AppError> {
    let Some(path) = applicants_csv else {
        return Ok(BoardService::from_config(config)?);
    };

    let mut fixtures = match &config.fixtures_path {
        Some(fixtures_path) => FixtureSet::from_json_path(fixtures_path)?,
        None => FixtureSet::sample(),
    };
    fixtures.applicants = applicants_from_csv_path(path)?;
    info!(
        path = %path.display(),
        applicants = fixtures.applicants.len(),
        "applicants imported from csv"
    );

    Ok(BoardService::new(
        fixtures,
        config.transition_policy,
        config.apply_latency,
    )?)
}

/// Parse a status tab argument, accepting `all` as the sentinel.
pub(crate) fn parse_tab<S>(raw: &str) -> Result<Tab<S>, String>
where
    S: FromStr,
    S::Err: std::fmt::Display,
{
    raw.parse::<Tab<S>>()
        .map_err(|err| format!("invalid status tab '{raw}' ({err})"))
}
