use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::pipeline::applicants::{ApplicationStatus, StatusUpdate, TransitionPolicy};
use crate::pipeline::query::{FilterCriteria, Scope, Tab};

#[tokio::test]
async fn list_returns_filtered_applicants_with_badges() {
    let response = router(TransitionPolicy::Permissive)
        .oneshot(get("/api/v1/applicants?status=shortlisted&q=java&job=job-1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["applicants"][0]["id"], "app-7");
    assert_eq!(payload["tabs"][0]["tab"], "all");
    assert_eq!(payload["tabs"][0]["count"], 8);
}

#[tokio::test]
async fn list_rejects_unknown_status_tab() {
    let response = router(TransitionPolicy::Permissive)
        .oneshot(get("/api/v1/applicants?status=archived"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_applicant_is_not_found() {
    let response = router(TransitionPolicy::Permissive)
        .oneshot(get("/api/v1/applicants/app-404"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "application app-404 not found");
}

#[tokio::test]
async fn status_update_applies_and_reports_outcome() {
    let service = board_service(TransitionPolicy::Permissive);
    let response = crate::pipeline::board_router(service.clone())
        .oneshot(post_json(
            "/api/v1/applicants/app-1/status",
            &json!({ "status": "interview" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "applied");
    assert_eq!(payload["from"], "pending");
    assert_eq!(payload["to"], "interview");

    let record = service.applicant(&id("app-1")).expect("app-1 present");
    assert_eq!(record.status, ApplicationStatus::Interview);
}

#[tokio::test]
async fn guarded_board_answers_refusals_with_conflict() {
    let response = router(TransitionPolicy::Guarded)
        .oneshot(post_json(
            "/api/v1/applicants/app-1/status",
            &json!({ "status": "hired" }),
        ))
        .await
        .expect("route executes");

    assert_conflict_response(&response);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"]["outcome"], "refused");
}

#[tokio::test]
async fn actions_list_the_guarded_successors() {
    let response = router(TransitionPolicy::Guarded)
        .oneshot(get("/api/v1/applicants/app-8/actions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["policy"], "guarded");
    assert_eq!(payload["actions"], json!(["shortlisted", "rejected"]));
}

#[tokio::test]
async fn advance_moves_one_stage() {
    let service = board_service(TransitionPolicy::Guarded);
    let response = crate::pipeline::board_router(service.clone())
        .oneshot(post_json("/api/v1/applicants/app-3/advance", &json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        service.applicant(&id("app-3")).map(|record| record.status),
        Some(ApplicationStatus::Hired)
    );
    assert_eq!(service.dashboard().hire_rate(), "25.0");
}

#[test]
fn service_listing_reflects_updates() {
    let service = board_service(TransitionPolicy::Permissive);
    let pending = FilterCriteria::new(Tab::Only(ApplicationStatus::Pending), "", Scope::All);

    assert_eq!(service.list_applicants(&pending).count, 2);
    assert_eq!(
        service.update_status(&id("app-6"), ApplicationStatus::Rejected),
        StatusUpdate::Applied {
            from: ApplicationStatus::Pending,
            to: ApplicationStatus::Rejected,
        }
    );

    let listing = service.list_applicants(&pending);
    assert_eq!(listing.count, 1);
    assert_eq!(listing.applicants[0].id, id("app-1"));
    let rejected = listing
        .tabs
        .iter()
        .find(|badge| badge.tab == "rejected")
        .expect("rejected badge");
    assert_eq!(rejected.count, 2);
}
