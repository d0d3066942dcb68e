//! Request body extraction.
//!
//! Issue bodies may be JSON objects or urlencoded forms; both become a
//! [`Fields`] map. Form values are always strings.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Form, FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use issue_lib::Fields;
use serde_json::{Value, json};

/// A loosely typed issue request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueBody(pub Fields);

/// The body could not be read as a JSON object or form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRejection {
    pub message: String,
}

impl BodyRejection {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let body = json!({ "error": format!("invalid request body: {}", self.message) });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Parse a JSON body. Whitespace-only bodies are an empty object.
///
/// # Errors
///
/// Returns a rejection if the body is not valid JSON or not an object.
pub fn parse_json_fields(bytes: &[u8]) -> Result<Fields, BodyRejection> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(BodyRejection::new("expected a JSON object")),
        Err(e) => Err(BodyRejection::new(e.to_string())),
    }
}

/// Form pairs as fields. A repeated key keeps its last value.
#[must_use]
pub fn form_fields(pairs: Vec<(String, String)>) -> Fields {
    pairs
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

impl<S> FromRequest<S> for IssueBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| BodyRejection::new(e.body_text()))?;
            return Ok(Self(form_fields(pairs)));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| BodyRejection::new(e.body_text()))?;
        parse_json_fields(&bytes).map(Self)
    }
}
