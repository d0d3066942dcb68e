//! `issue-lib` — In-memory project/issue store.
//!
//! Issues live in named projects; a project appears the first time an
//! issue is created in it. All operations are synchronous and take
//! loosely typed request bodies ([`Fields`]).
//!
//! # Quick Start
//!
//! ```
//! use issue_lib::{IssueTracker, ListFilters};
//! use serde_json::json;
//!
//! let mut tracker = IssueTracker::new();
//! let body = json!({ "issue_title": "A", "issue_text": "B", "created_by": "C" });
//! let issue = tracker.create_issue("demo", body.as_object().unwrap()).unwrap();
//!
//! let open = tracker.list_issues("demo", &ListFilters::new().with("open", "true"));
//! assert_eq!(open, vec![&issue]);
//! ```

pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod util;

pub use error::{IssueError, Result};
pub use model::{Issue, IssueField, ObjectId, Project, format_timestamp};
pub use query::{FieldChange, Fields, IssueUpdate, ListFilters, NewIssue};
pub use store::{InMemoryStore, IssueTracker, ProjectRepository};
pub use util::{Clock, ManualClock, ObjectIdGenerator, SystemClock};
