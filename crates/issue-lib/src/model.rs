//! Core data types for issue-lib.
//!
//! Field names follow the wire format used by the REST surface
//! (`_id`, `issue_title`, `created_on`, ...).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::IssueError;

/// Render a timestamp the way it appears on the wire.
///
/// ISO-8601 with millisecond precision and a `Z` suffix, e.g.
/// `2024-05-01T12:00:00.000Z`.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&value)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

const fn default_open() -> bool {
    true
}

// ============================================================================
// ObjectId
// ============================================================================

/// 12-byte issue identifier, displayed as 24 lowercase hex characters.
///
/// Layout: 4-byte big-endian creation second, 5-byte per-process value,
/// 3-byte big-endian counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Number of raw bytes.
    pub const LEN: usize = 12;

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// The creation second embedded in the first four bytes.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        let secs = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        DateTime::from_timestamp(i64::from(secs), 0).unwrap_or_default()
    }

    /// True if `value` is a well-formed id: exactly 24 hex characters.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.len() == Self::LEN * 2 && value.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IssueError::InvalidObjectId {
            value: s.to_string(),
        };
        if !Self::is_valid(s) {
            return Err(invalid());
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Issue
// ============================================================================

/// Names of the fields an issue carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueField {
    Id,
    IssueTitle,
    IssueText,
    CreatedOn,
    UpdatedOn,
    CreatedBy,
    AssignedTo,
    Open,
    StatusText,
}

impl IssueField {
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::IssueTitle,
        Self::IssueText,
        Self::CreatedOn,
        Self::UpdatedOn,
        Self::CreatedBy,
        Self::AssignedTo,
        Self::Open,
        Self::StatusText,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "_id",
            Self::IssueTitle => "issue_title",
            Self::IssueText => "issue_text",
            Self::CreatedOn => "created_on",
            Self::UpdatedOn => "updated_on",
            Self::CreatedBy => "created_by",
            Self::AssignedTo => "assigned_to",
            Self::Open => "open",
            Self::StatusText => "status_text",
        }
    }

    /// Look up a field by its wire name. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Fields a client may change through an update.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        !matches!(self, Self::Id | Self::CreatedOn | Self::UpdatedOn)
    }
}

/// A single tracked issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Server-generated identifier.
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub issue_title: String,

    pub issue_text: String,

    /// Set once at creation.
    #[serde(with = "iso_millis")]
    pub created_on: DateTime<Utc>,

    /// Restamped on every successful update.
    #[serde(with = "iso_millis")]
    pub updated_on: DateTime<Utc>,

    pub created_by: String,

    #[serde(default)]
    pub assigned_to: String,

    #[serde(default = "default_open")]
    pub open: bool,

    #[serde(default)]
    pub status_text: String,
}

impl Issue {
    /// The string form of a field, as compared by list filters.
    /// Timestamps use the wire ISO-8601 form (`2024-05-01T12:00:00.000Z`).
    #[must_use]
    pub fn field_text(&self, field: IssueField) -> String {
        match field {
            IssueField::Id => self.id.to_string(),
            IssueField::IssueTitle => self.issue_title.clone(),
            IssueField::IssueText => self.issue_text.clone(),
            IssueField::CreatedOn => format_timestamp(&self.created_on),
            IssueField::UpdatedOn => format_timestamp(&self.updated_on),
            IssueField::CreatedBy => self.created_by.clone(),
            IssueField::AssignedTo => self.assigned_to.clone(),
            IssueField::Open => self.open.to_string(),
            IssueField::StatusText => self.status_text.clone(),
        }
    }

    /// True if this issue's id stringifies to `id`.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id.to_string() == id
    }
}

// ============================================================================
// Project
// ============================================================================

/// A named collection of issues, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub issues: Vec<Issue>,
}

impl Project {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn find_issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.has_id(id))
    }

    pub fn find_issue_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|issue| issue.has_id(id))
    }

    /// Index of the first issue matching `id`.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.issues.iter().position(|issue| issue.has_id(id))
    }
}
