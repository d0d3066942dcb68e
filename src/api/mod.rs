//! HTTP surface for the issue tracker.
//!
//! One resource, `/api/issues/{project}`, with GET/POST/PUT/DELETE.
//! Logical failures are reported as 200 JSON payloads.

pub mod body;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use issue_lib::IssueTracker;
use tokio::sync::RwLock;
use tracing::{Instrument, info, info_span};

/// Route path for the issue resource.
pub const ISSUES_PATH: &str = "/api/issues/{project}";

/// The store, shared across requests.
pub type SharedTracker = Arc<RwLock<IssueTracker>>;

/// Shared application dependencies.
#[derive(Clone)]
pub struct AppState {
    pub tracker: SharedTracker,
}

impl AppState {
    #[must_use]
    pub fn new(tracker: IssueTracker) -> Self {
        Self {
            tracker: Arc::new(RwLock::new(tracker)),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            ISSUES_PATH,
            get(handlers::list_issues)
                .post(handlers::create_issue)
                .put(handlers::update_issue)
                .delete(handlers::delete_issue),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

async fn trace_request(req: Request, next: Next) -> Response {
    let span = info_span!("request", method = %req.method(), path = %req.uri().path());
    async move {
        let started = Instant::now();
        let response = next.run(req).await;
        info!(
            status = response.status().as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "handled"
        );
        response
    }
    .instrument(span)
    .await
}
