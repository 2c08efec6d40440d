use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::applicants::{ApplicationId, ApplicationStatus, StatusUpdate};
use super::jobs::{JobDraft, JobId, JobListField, JobMutation, JobStatus, JobUpdate};
use super::query::{FilterCriteria, Scope, Tab};
use super::seeker::ApplyError;
use super::service::{BoardService, SeekerApplyError};

/// Router exposing the applicant pipeline, posting management, the seeker
/// flow, and the dashboard aggregates.
pub fn board_router(service: Arc<BoardService>) -> Router {
    Router::new()
        .route("/api/v1/applicants", get(list_applicants_handler))
        .route("/api/v1/applicants/:application_id", get(applicant_handler))
        .route(
            "/api/v1/applicants/:application_id/actions",
            get(applicant_actions_handler),
        )
        .route(
            "/api/v1/applicants/:application_id/status",
            post(update_status_handler),
        )
        .route(
            "/api/v1/applicants/:application_id/advance",
            post(advance_handler),
        )
        .route(
            "/api/v1/jobs",
            get(list_jobs_handler).post(create_job_handler),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(job_handler)
                .patch(update_job_handler)
                .delete(delete_job_handler),
        )
        .route("/api/v1/jobs/:job_id/pause", post(pause_job_handler))
        .route("/api/v1/jobs/:job_id/resume", post(resume_job_handler))
        .route("/api/v1/jobs/:job_id/close", post(close_job_handler))
        .route("/api/v1/jobs/:job_id/lists/:field", post(push_list_item_handler))
        .route(
            "/api/v1/jobs/:job_id/lists/:field/:index",
            delete(remove_list_item_handler),
        )
        .route("/api/v1/seeker/jobs", get(browse_jobs_handler))
        .route("/api/v1/seeker/jobs/:job_id", get(seeker_job_handler))
        .route("/api/v1/seeker/jobs/:job_id/apply", post(apply_handler))
        .route("/api/v1/seeker/jobs/:job_id/save", post(toggle_saved_handler))
        .route("/api/v1/seeker/applications", get(seeker_applications_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    job: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    saved: bool,
}

impl ListParams {
    fn criteria<S>(&self, scope: Option<&str>) -> Result<FilterCriteria<S>, Response>
    where
        S: FromStr + Copy + Eq,
        S::Err: std::fmt::Display,
    {
        let tab = match self.status.as_deref() {
            Some(raw) => raw.parse::<Tab<S>>().map_err(|err| bad_request(err.to_string()))?,
            None => Tab::All,
        };
        let scope = scope.map(Scope::from).unwrap_or_default();
        Ok(FilterCriteria::new(
            tab,
            self.q.clone().unwrap_or_default(),
            scope,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListItem {
    value: String,
}

pub(crate) async fn list_applicants_handler(
    State(service): State<Arc<BoardService>>,
    Query(params): Query<ListParams>,
) -> Response {
    let criteria = match params.criteria::<ApplicationStatus>(params.job.as_deref()) {
        Ok(criteria) => criteria,
        Err(response) => return response,
    };
    (StatusCode::OK, Json(service.list_applicants(&criteria))).into_response()
}

pub(crate) async fn applicant_handler(
    State(service): State<Arc<BoardService>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    match service.applicant(&id) {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => application_not_found(&id),
    }
}

pub(crate) async fn applicant_actions_handler(
    State(service): State<Arc<BoardService>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    match service.applicant_actions(&id) {
        Some(actions) => {
            let payload = json!({
                "application_id": id,
                "policy": service.policy().to_string(),
                "actions": actions,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        None => application_not_found(&id),
    }
}

pub(crate) async fn update_status_handler(
    State(service): State<Arc<BoardService>>,
    Path(application_id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Response {
    let id = ApplicationId(application_id);
    let status = match change.status.parse::<ApplicationStatus>() {
        Ok(status) => status,
        Err(err) => return bad_request(err.to_string()),
    };
    status_update_response(&id, service.update_status(&id, status))
}

pub(crate) async fn advance_handler(
    State(service): State<Arc<BoardService>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    status_update_response(&id, service.advance(&id))
}

pub(crate) async fn list_jobs_handler(
    State(service): State<Arc<BoardService>>,
    Query(params): Query<ListParams>,
) -> Response {
    let criteria = match params.criteria::<JobStatus>(params.company.as_deref()) {
        Ok(criteria) => criteria,
        Err(response) => return response,
    };
    (StatusCode::OK, Json(service.list_jobs(&criteria))).into_response()
}

pub(crate) async fn job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    match service.job(&id) {
        Some(job) => (StatusCode::OK, Json(job)).into_response(),
        None => job_not_found(&id),
    }
}

pub(crate) async fn create_job_handler(
    State(service): State<Arc<BoardService>>,
    Json(draft): Json<JobDraft>,
) -> Response {
    let job = service.create_job(draft);
    (StatusCode::CREATED, Json(job)).into_response()
}

pub(crate) async fn update_job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
    Json(update): Json<JobUpdate>,
) -> Response {
    let id = JobId(job_id);
    let outcome = service.update_job(&id, &update);
    job_mutation_response(&service, &id, outcome, false)
}

pub(crate) async fn delete_job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    match service.delete_job(&id) {
        JobMutation::NotFound => job_not_found(&id),
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}

pub(crate) async fn pause_job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    let outcome = service.pause_job(&id);
    job_mutation_response(&service, &id, outcome, true)
}

pub(crate) async fn resume_job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    let outcome = service.resume_job(&id);
    job_mutation_response(&service, &id, outcome, true)
}

pub(crate) async fn close_job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    let outcome = service.close_job(&id);
    job_mutation_response(&service, &id, outcome, true)
}

pub(crate) async fn push_list_item_handler(
    State(service): State<Arc<BoardService>>,
    Path((job_id, field)): Path<(String, JobListField)>,
    Json(item): Json<ListItem>,
) -> Response {
    let id = JobId(job_id);
    let outcome = service.push_list_item(&id, field, item.value);
    job_mutation_response(&service, &id, outcome, false)
}

pub(crate) async fn remove_list_item_handler(
    State(service): State<Arc<BoardService>>,
    Path((job_id, field, index)): Path<(String, JobListField, usize)>,
) -> Response {
    let id = JobId(job_id);
    let outcome = service.remove_list_item(&id, field, index);
    job_mutation_response(&service, &id, outcome, false)
}

pub(crate) async fn browse_jobs_handler(
    State(service): State<Arc<BoardService>>,
    Query(params): Query<ListParams>,
) -> Response {
    let criteria = match params.criteria::<JobStatus>(params.company.as_deref()) {
        Ok(criteria) => criteria,
        Err(response) => return response,
    };
    let jobs = service.browse_jobs(&criteria, params.saved).await;
    (StatusCode::OK, Json(jobs)).into_response()
}

pub(crate) async fn seeker_job_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    match service.view_job(&id) {
        Some(job) => (StatusCode::OK, Json(job)).into_response(),
        None => job_not_found(&id),
    }
}

pub(crate) async fn apply_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    match service.apply(&id).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(SeekerApplyError::UnknownJob(_)) => job_not_found(&id),
        Err(SeekerApplyError::Apply(err @ ApplyError::AlreadyApplied(_))) => {
            conflict(json!({ "error": err.to_string() }))
        }
        Err(SeekerApplyError::Apply(err @ ApplyError::NotAccepting { .. })) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn toggle_saved_handler(
    State(service): State<Arc<BoardService>>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId(job_id);
    if service.job(&id).is_none() {
        return job_not_found(&id);
    }
    let saved = service.toggle_saved(&id).await;
    (StatusCode::OK, Json(json!({ "job_id": id, "saved": saved }))).into_response()
}

pub(crate) async fn seeker_applications_handler(
    State(service): State<Arc<BoardService>>,
) -> Response {
    (StatusCode::OK, Json(service.seeker_applications().await)).into_response()
}

pub(crate) async fn dashboard_handler(State(service): State<Arc<BoardService>>) -> Response {
    (StatusCode::OK, Json(service.dashboard())).into_response()
}

fn status_update_response(id: &ApplicationId, outcome: StatusUpdate) -> Response {
    match outcome {
        StatusUpdate::NotFound => application_not_found(id),
        StatusUpdate::Refused { from, to } => conflict(json!({
            "error": format!("cannot move application {id} from {from} to {to}"),
            "outcome": outcome,
        })),
        StatusUpdate::Applied { .. } | StatusUpdate::Unchanged => {
            (StatusCode::OK, Json(outcome)).into_response()
        }
    }
}

/// Lifecycle moves report a no-op as a conflict; edits report the current posting.
fn job_mutation_response(
    service: &BoardService,
    id: &JobId,
    outcome: JobMutation,
    conflict_on_unchanged: bool,
) -> Response {
    if outcome == JobMutation::NotFound {
        return job_not_found(id);
    }
    let Some(job) = service.job(id) else {
        return job_not_found(id);
    };
    if outcome == JobMutation::Unchanged && conflict_on_unchanged {
        return conflict(json!({
            "error": format!("job {id} is {} and cannot make that move", job.status),
            "outcome": outcome,
        }));
    }
    (StatusCode::OK, Json(job)).into_response()
}

fn application_not_found(id: &ApplicationId) -> Response {
    let payload = json!({ "error": format!("application {id} not found") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn job_not_found(id: &JobId) -> Response {
    let payload = json!({ "error": format!("job {id} not found") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn conflict(payload: serde_json::Value) -> Response {
    (StatusCode::CONFLICT, Json(payload)).into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
