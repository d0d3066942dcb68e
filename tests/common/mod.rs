#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use issue_lib::IssueTracker;
use issue_tracker::api::{self, AppState};
use issue_tracker::logging;
use serde_json::Value;
use tower::ServiceExt;

/// In-process router over a fresh store.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        logging::init_test_logging();
        Self {
            router: api::router(AppState::new(IssueTracker::new())),
        }
    }

    pub async fn raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let (status, bytes) = self.raw(request).await;
        (status, serde_json::from_slice(&bytes).expect("json response"))
    }

    pub async fn form(&self, method: Method, uri: &str, form: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        let (status, bytes) = self.raw(request).await;
        (status, serde_json::from_slice(&bytes).expect("json response"))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::DELETE, uri, Some(body)).await
    }
}

/// Assert a wire timestamp is within five seconds of now.
pub fn assert_recent(value: &Value) {
    let text = value.as_str().expect("timestamp string");
    let ts = DateTime::parse_from_rfc3339(text)
        .expect("ISO-8601 timestamp")
        .with_timezone(&Utc);
    let drift = (Utc::now() - ts).num_milliseconds().abs();
    assert!(drift < 5_000, "timestamp {text} is {drift}ms from now");
}
