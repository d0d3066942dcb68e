//! Error types for `issue-lib`.
//!
//! The display strings of the request-level variants are exactly the
//! `error` strings clients see in response payloads.

use serde_json::Value;
use thiserror::Error;

/// Primary error type for issue-lib operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IssueError {
    // === Create Errors ===
    /// One or more of `issue_title`, `issue_text`, `created_by` was absent.
    #[error("required field(s) missing")]
    MissingRequiredFields { fields: Vec<&'static str> },

    // === Update / Delete Errors ===
    /// The request body carried no `_id` key.
    #[error("missing _id")]
    MissingId,

    /// Only `_id` was sent; nothing to change.
    #[error("no update field(s) sent")]
    NoUpdateFields { id: Value },

    /// No issue matched, or a field value could not be applied.
    #[error("could not update")]
    CouldNotUpdate { id: Value },

    /// No issue matched the submitted `_id`.
    #[error("could not delete")]
    CouldNotDelete { id: Value },

    // === Identifier Errors ===
    /// A string that is not 24 hex characters was parsed as an object id.
    #[error("Invalid object id: {value}")]
    InvalidObjectId { value: String },
}

impl IssueError {
    /// The `_id` value the client submitted, for errors that echo it back.
    #[must_use]
    pub const fn submitted_id(&self) -> Option<&Value> {
        match self {
            Self::NoUpdateFields { id }
            | Self::CouldNotUpdate { id }
            | Self::CouldNotDelete { id } => Some(id),
            Self::MissingRequiredFields { .. } | Self::MissingId | Self::InvalidObjectId { .. } => {
                None
            }
        }
    }
}

/// Result type using `IssueError`.
pub type Result<T> = std::result::Result<T, IssueError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_matches_wire_strings() {
        assert_eq!(
            IssueError::MissingRequiredFields { fields: vec!["created_by"] }.to_string(),
            "required field(s) missing"
        );
        assert_eq!(IssueError::MissingId.to_string(), "missing _id");
        assert_eq!(
            IssueError::NoUpdateFields { id: json!("x") }.to_string(),
            "no update field(s) sent"
        );
        assert_eq!(
            IssueError::CouldNotUpdate { id: json!("x") }.to_string(),
            "could not update"
        );
        assert_eq!(
            IssueError::CouldNotDelete { id: json!("x") }.to_string(),
            "could not delete"
        );
    }

    #[test]
    fn test_submitted_id_only_on_echoing_variants() {
        assert_eq!(
            IssueError::CouldNotDelete { id: json!(42) }.submitted_id(),
            Some(&json!(42))
        );
        assert!(IssueError::MissingId.submitted_id().is_none());
        assert!(
            IssueError::MissingRequiredFields { fields: vec![] }
                .submitted_id()
                .is_none()
        );
    }
}
