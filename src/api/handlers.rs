//! Handlers for `/api/issues/{project}`.

use std::convert::identity;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use issue_lib::{Issue, ListFilters};

use super::AppState;
use super::body::IssueBody;
use crate::format::{DELETED, Outcome, ResultPayload, UPDATED};

/// `GET` - issues in the project matching every query pair.
pub async fn list_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Issue>> {
    let filters = ListFilters::from_pairs(pairs);
    let tracker = state.tracker.read().await;
    let issues = tracker
        .list_issues(&project, &filters)
        .into_iter()
        .cloned()
        .collect();
    Json(issues)
}

/// `POST` - create an issue, creating the project if needed.
pub async fn create_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    IssueBody(fields): IssueBody,
) -> Outcome<Issue> {
    let mut tracker = state.tracker.write().await;
    Outcome::from_result(tracker.create_issue(&project, &fields), identity)
}

/// `PUT` - partial update of the issue named by `_id`.
pub async fn update_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    IssueBody(fields): IssueBody,
) -> Outcome<ResultPayload> {
    let mut tracker = state.tracker.write().await;
    Outcome::from_result(tracker.update_issue(&project, &fields), |issue| {
        ResultPayload::new(UPDATED, issue.id)
    })
}

/// `DELETE` - remove the issue named by `_id`.
pub async fn delete_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    IssueBody(fields): IssueBody,
) -> Outcome<ResultPayload> {
    let mut tracker = state.tracker.write().await;
    Outcome::from_result(tracker.delete_issue(&project, &fields), |issue| {
        ResultPayload::new(DELETED, issue.id)
    })
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
