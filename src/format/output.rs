use axum::Json;
use axum::response::{IntoResponse, Response};
use issue_lib::IssueError;
use serde::Serialize;
use serde_json::Value;

pub const UPDATED: &str = "successfully updated";
pub const DELETED: &str = "successfully deleted";

/// `{"error": ..., "_id": ...}`; `_id` only when the error echoes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl From<&IssueError> for ErrorPayload {
    fn from(err: &IssueError) -> Self {
        Self {
            error: err.to_string(),
            id: err.submitted_id().cloned(),
        }
    }
}

/// `{"result": ..., "_id": ...}` for successful update/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPayload {
    pub result: &'static str,
    #[serde(rename = "_id")]
    pub id: String,
}

impl ResultPayload {
    #[must_use]
    pub fn new(result: &'static str, id: impl ToString) -> Self {
        Self {
            result,
            id: id.to_string(),
        }
    }
}

/// Either the success body or an error payload, serialized bare.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Done(T),
    Failed(ErrorPayload),
}

impl<T> Outcome<T> {
    /// Map a store result, turning the success value into `T`.
    pub fn from_result<U>(result: issue_lib::Result<U>, f: impl FnOnce(U) -> T) -> Self {
        match result {
            Ok(value) => Self::Done(f(value)),
            Err(ref err) => Self::Failed(err.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of `version --json`.
#[derive(Debug, Serialize)]
pub struct VersionOutput<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub build: &'a str,
}
