use std::sync::Arc;
use std::time::Duration;

use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::pipeline::applicants::{
    ApplicantStore, ApplicationId, ApplicationRecord, ApplicationStatus, TransitionPolicy,
};
use crate::pipeline::fixtures::FixtureSet;
use crate::pipeline::query::{FilterCriteria, Scope, Tab};
use crate::pipeline::{board_router, BoardService};

pub(super) fn sample_records() -> Vec<ApplicationRecord> {
    FixtureSet::sample().applicants
}

pub(super) fn sample_store(policy: TransitionPolicy) -> ApplicantStore {
    ApplicantStore::new(sample_records(), policy).expect("sample ids are unique")
}

pub(super) fn id(raw: &str) -> ApplicationId {
    ApplicationId::from(raw)
}

pub(super) fn ids(records: &[Arc<ApplicationRecord>]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

pub(super) fn criteria(
    tab: Tab<ApplicationStatus>,
    search: &str,
    scope: Scope,
) -> FilterCriteria<ApplicationStatus> {
    FilterCriteria::new(tab, search, scope)
}

pub(super) fn board_service(policy: TransitionPolicy) -> Arc<BoardService> {
    Arc::new(
        BoardService::new(FixtureSet::sample(), policy, Duration::ZERO)
            .expect("sample fixtures seed the service"),
    )
}

pub(super) fn router(policy: TransitionPolicy) -> axum::Router {
    board_router(board_service(policy))
}

pub(super) fn get(uri: &str) -> Request<axum::body::Body> {
    Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("valid request")
}

pub(super) fn post_json(uri: &str, payload: &Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("serializable payload"),
        ))
        .expect("valid request")
}

pub(super) fn assert_conflict_response(response: &Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
