//! Request field types for issue operations.
//!
//! Bodies arrive as loosely typed JSON objects. Values are read with a
//! weak-typing contract: strings as-is, numbers and booleans by their
//! string form, `null` as absent.

use serde_json::{Map, Value};

use crate::model::{Issue, IssueField};

/// A request body: field name to submitted value.
pub type Fields = Map<String, Value>;

/// String form of a submitted value, or `None` for `null`.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Boolean reading of a submitted value. Accepts JSON booleans and the
/// strings `true`/`false` that form posts carry.
#[must_use]
pub fn value_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// The submitted `_id`, if the key is present at all.
#[must_use]
pub fn submitted_id(fields: &Fields) -> Option<&Value> {
    fields.get(IssueField::Id.as_str())
}

/// Fields for creating an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

impl NewIssue {
    /// Read creation fields from a request body. Unrelated keys are ignored.
    #[must_use]
    pub fn from_fields(fields: &Fields) -> Self {
        let text = |field: IssueField| fields.get(field.as_str()).and_then(value_text);
        Self {
            issue_title: text(IssueField::IssueTitle),
            issue_text: text(IssueField::IssueText),
            created_by: text(IssueField::CreatedBy),
            assigned_to: text(IssueField::AssignedTo),
            status_text: text(IssueField::StatusText),
        }
    }

    /// Names of required fields that were not supplied. An empty string
    /// counts as supplied.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (IssueField::IssueTitle, &self.issue_title),
            (IssueField::IssueText, &self.issue_text),
            (IssueField::CreatedBy, &self.created_by),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| field.as_str())
        .collect()
    }
}

/// A single field assignment carried by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    IssueTitle(String),
    IssueText(String),
    CreatedBy(String),
    AssignedTo(String),
    StatusText(String),
    Open(bool),
}

impl FieldChange {
    /// Write the value into `issue` if it differs. Returns true on change.
    pub fn apply(&self, issue: &mut Issue) -> bool {
        fn assign<T: PartialEq + Clone>(slot: &mut T, value: &T) -> bool {
            if slot == value {
                return false;
            }
            slot.clone_from(value);
            true
        }

        match self {
            Self::IssueTitle(v) => assign(&mut issue.issue_title, v),
            Self::IssueText(v) => assign(&mut issue.issue_text, v),
            Self::CreatedBy(v) => assign(&mut issue.created_by, v),
            Self::AssignedTo(v) => assign(&mut issue.assigned_to, v),
            Self::StatusText(v) => assign(&mut issue.status_text, v),
            Self::Open(v) => assign(&mut issue.open, v),
        }
    }

    #[must_use]
    pub const fn field(&self) -> IssueField {
        match self {
            Self::IssueTitle(_) => IssueField::IssueTitle,
            Self::IssueText(_) => IssueField::IssueText,
            Self::CreatedBy(_) => IssueField::CreatedBy,
            Self::AssignedTo(_) => IssueField::AssignedTo,
            Self::StatusText(_) => IssueField::StatusText,
            Self::Open(_) => IssueField::Open,
        }
    }
}

/// A partial update request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueUpdate {
    /// The submitted `_id`, `None` when the key was absent.
    pub id: Option<Value>,
    /// Total number of keys in the body, `_id` included.
    pub key_count: usize,
    /// Assignments to apply, in body order.
    pub changes: Vec<FieldChange>,
    /// Mutable fields whose value could not be read.
    pub rejected: Vec<String>,
}

impl IssueUpdate {
    /// Read an update from a request body.
    ///
    /// `_id`, timestamps, and unknown keys count toward `key_count` but
    /// produce no change. A `null` text value is treated as unreadable.
    #[must_use]
    pub fn from_fields(fields: &Fields) -> Self {
        let mut update = Self {
            id: submitted_id(fields).cloned(),
            key_count: fields.len(),
            ..Self::default()
        };

        for (key, value) in fields {
            let Some(field) = IssueField::from_name(key).filter(IssueField::is_mutable) else {
                tracing::trace!(field = %key, "ignoring non-updatable field");
                continue;
            };

            let change = match field {
                IssueField::Open => value_flag(value).map(FieldChange::Open),
                IssueField::IssueTitle => value_text(value).map(FieldChange::IssueTitle),
                IssueField::IssueText => value_text(value).map(FieldChange::IssueText),
                IssueField::CreatedBy => value_text(value).map(FieldChange::CreatedBy),
                IssueField::AssignedTo => value_text(value).map(FieldChange::AssignedTo),
                IssueField::StatusText => value_text(value).map(FieldChange::StatusText),
                IssueField::Id | IssueField::CreatedOn | IssueField::UpdatedOn => continue,
            };

            match change {
                Some(change) => update.changes.push(change),
                None => update.rejected.push(key.clone()),
            }
        }

        update
    }

    /// True when nothing besides `_id` was sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.key_count < 2
    }
}

/// Equality filters for listing issues. All filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    filters: Vec<(String, String)>,
}

impl ListFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(field, value)` pairs, e.g. a parsed query string.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            filters: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add a filter.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if every filter's value equals the issue's stringified field.
    /// A filter naming an unknown field never matches.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.filters.iter().all(|(name, expected)| {
            IssueField::from_name(name).is_some_and(|field| issue.field_text(field) == *expected)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectId;
    use chrono::Utc;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn make_issue(created_by: &str, open: bool) -> Issue {
        let now = Utc::now();
        Issue {
            id: ObjectId::from_bytes([7; 12]),
            issue_title: "Title".to_string(),
            issue_text: "Text".to_string(),
            created_on: now,
            updated_on: now,
            created_by: created_by.to_string(),
            assigned_to: String::new(),
            open,
            status_text: String::new(),
        }
    }

    #[test]
    fn test_value_text_weak_typing() {
        assert_eq!(value_text(&json!("a")), Some("a".to_string()));
        assert_eq!(value_text(&json!(12)), Some("12".to_string()));
        assert_eq!(value_text(&json!(false)), Some("false".to_string()));
        assert_eq!(value_text(&json!("")), Some(String::new()));
        assert_eq!(value_text(&Value::Null), None);
    }

    #[test]
    fn test_value_flag() {
        assert_eq!(value_flag(&json!(false)), Some(false));
        assert_eq!(value_flag(&json!("true")), Some(true));
        assert_eq!(value_flag(&json!("false")), Some(false));
        assert_eq!(value_flag(&json!("maybe")), None);
        assert_eq!(value_flag(&json!(0)), None);
    }

    #[test]
    fn test_new_issue_missing_fields() {
        let new = NewIssue::from_fields(&fields(json!({
            "issue_title": "Fix error",
            "created_by": "Joe",
            "assigned_to": "Joe"
        })));
        assert_eq!(new.missing_fields(), vec!["issue_text"]);

        let empty_strings = NewIssue::from_fields(&fields(json!({
            "issue_title": "",
            "issue_text": "",
            "created_by": ""
        })));
        assert!(empty_strings.missing_fields().is_empty());

        let nulls = NewIssue::from_fields(&fields(json!({
            "issue_title": null,
            "issue_text": "t",
            "created_by": "c"
        })));
        assert_eq!(nulls.missing_fields(), vec!["issue_title"]);
    }

    #[test]
    fn test_update_counts_every_key() {
        let update = IssueUpdate::from_fields(&fields(json!({
            "_id": "abc",
            "created_on": "2020-01-01T00:00:00.000Z",
            "priority": "high"
        })));
        assert_eq!(update.id, Some(json!("abc")));
        assert_eq!(update.key_count, 3);
        assert!(!update.is_empty());
        assert!(update.changes.is_empty());
        assert!(update.rejected.is_empty());
    }

    #[test]
    fn test_update_only_id_is_empty() {
        let update = IssueUpdate::from_fields(&fields(json!({ "_id": "abc" })));
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_reads_changes_and_rejects_bad_flag() {
        let update = IssueUpdate::from_fields(&fields(json!({
            "_id": "abc",
            "issue_title": "New",
            "open": "false"
        })));
        assert_eq!(
            update.changes,
            vec![
                FieldChange::IssueTitle("New".to_string()),
                FieldChange::Open(false)
            ]
        );

        let bad = IssueUpdate::from_fields(&fields(json!({ "_id": "abc", "open": "maybe" })));
        assert_eq!(bad.rejected, vec!["open".to_string()]);
    }

    #[test]
    fn test_field_change_apply_reports_difference() {
        let mut issue = make_issue("Joe", true);
        assert!(!FieldChange::CreatedBy("Joe".to_string()).apply(&mut issue));
        assert!(FieldChange::Open(false).apply(&mut issue));
        assert!(!issue.open);
    }

    #[test]
    fn test_filters_and_together() {
        let issue = make_issue("Win", true);
        assert!(ListFilters::new().matches(&issue));
        assert!(ListFilters::new().with("open", "true").matches(&issue));
        assert!(
            ListFilters::new()
                .with("open", "true")
                .with("created_by", "Win")
                .matches(&issue)
        );
        assert!(
            !ListFilters::new()
                .with("open", "true")
                .with("created_by", "Joe")
                .matches(&issue)
        );
        assert!(!ListFilters::new().with("created_by", "win").matches(&issue));
    }

    #[test]
    fn test_filter_unknown_field_never_matches() {
        let issue = make_issue("Win", true);
        assert!(!ListFilters::new().with("priority", "").matches(&issue));
    }

    #[test]
    fn test_filter_by_id() {
        let issue = make_issue("Win", false);
        let filters = ListFilters::from_pairs([("_id", issue.id.to_string()), ("open", "false".to_string())]);
        assert_eq!(filters.len(), 2);
        assert!(filters.matches(&issue));
    }
}
