//! Project repository and the issue operations built on it.
//!
//! [`InMemoryStore`] keeps projects in a `Vec` and finds them by linear
//! scan. [`IssueTracker`] implements create/list/update/delete against
//! any [`ProjectRepository`].

use std::sync::Arc;

use tracing::debug;

use crate::error::{IssueError, Result};
use crate::model::{Issue, Project};
use crate::query::{Fields, IssueUpdate, ListFilters, NewIssue, submitted_id, value_text};
use crate::util::{Clock, ObjectIdGenerator, SystemClock};

// ============================================================================
// Repository
// ============================================================================

/// Lookup and lazy creation of projects by name.
pub trait ProjectRepository {
    /// Find a project by exact (case-sensitive) name.
    fn find_project(&self, name: &str) -> Option<&Project>;

    fn find_project_mut(&mut self, name: &str) -> Option<&mut Project>;

    /// Return the named project, creating it empty if absent.
    fn project_or_insert(&mut self, name: &str) -> &mut Project;

    /// Names of all projects, in creation order.
    fn project_names(&self) -> Vec<&str>;
}

/// In-memory project store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    projects: Vec<Project>,
}

impl InMemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Total issues across every project.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.projects.iter().map(|p| p.issues.len()).sum()
    }
}

impl ProjectRepository for InMemoryStore {
    fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    fn find_project_mut(&mut self, name: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.name == name)
    }

    fn project_or_insert(&mut self, name: &str) -> &mut Project {
        let index = match self.projects.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                debug!(project = name, "creating project");
                self.projects.push(Project::new(name));
                self.projects.len() - 1
            }
        };
        &mut self.projects[index]
    }

    fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Issue operations over a project repository.
pub struct IssueTracker<R = InMemoryStore> {
    repo: R,
    clock: Arc<dyn Clock>,
    ids: ObjectIdGenerator,
}

impl IssueTracker<InMemoryStore> {
    /// Tracker over an empty in-memory store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_repository(InMemoryStore::new(), Arc::new(SystemClock))
    }
}

impl Default for IssueTracker<InMemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProjectRepository> IssueTracker<R> {
    #[must_use]
    pub fn with_repository(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            ids: ObjectIdGenerator::new(),
        }
    }

    /// Replace the id generator (e.g. with a seeded one).
    #[must_use]
    pub fn with_id_generator(mut self, ids: ObjectIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    /// Create an issue in `project`, creating the project on first use.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredFields` if `issue_title`, `issue_text` or
    /// `created_by` is absent. Nothing is stored in that case.
    pub fn create_issue(&mut self, project: &str, fields: &Fields) -> Result<Issue> {
        let new = NewIssue::from_fields(fields);
        let missing = new.missing_fields();
        if !missing.is_empty() {
            debug!(project, ?missing, "rejecting create: required fields missing");
            return Err(IssueError::MissingRequiredFields { fields: missing });
        }

        let now = self.clock.now();
        let issue = Issue {
            id: self.ids.generate(now),
            issue_title: new.issue_title.unwrap_or_default(),
            issue_text: new.issue_text.unwrap_or_default(),
            created_on: now,
            updated_on: now,
            created_by: new.created_by.unwrap_or_default(),
            assigned_to: new.assigned_to.unwrap_or_default(),
            open: true,
            status_text: new.status_text.unwrap_or_default(),
        };

        self.repo.project_or_insert(project).issues.push(issue.clone());
        debug!(project, id = %issue.id, "created issue");

        Ok(issue)
    }

    /// Issues in `project` matching every filter, in insertion order.
    /// An unknown project has no issues.
    #[must_use]
    pub fn list_issues(&self, project: &str, filters: &ListFilters) -> Vec<&Issue> {
        let Some(p) = self.repo.find_project(project) else {
            debug!(project, "listing unknown project");
            return Vec::new();
        };

        let found: Vec<_> = p.issues.iter().filter(|issue| filters.matches(issue)).collect();
        debug!(project, filters = filters.len(), matched = found.len(), "listed issues");
        found
    }

    /// Apply a partial update to the issue named by `_id`.
    ///
    /// Checks run in order: `_id` present, at least one other key, issue
    /// found, every value readable. Only then are differing fields
    /// written; `updated_on` is stamped regardless.
    ///
    /// # Errors
    ///
    /// Returns `MissingId`, `NoUpdateFields` or `CouldNotUpdate`.
    pub fn update_issue(&mut self, project: &str, fields: &Fields) -> Result<Issue> {
        let update = IssueUpdate::from_fields(fields);
        let Some(id) = update.id.clone() else {
            return Err(IssueError::MissingId);
        };
        if update.is_empty() {
            return Err(IssueError::NoUpdateFields { id });
        }

        let now = self.clock.now();
        let key = value_text(&id);
        let found = match key.as_deref() {
            Some(key) => self
                .repo
                .find_project_mut(project)
                .and_then(|p| p.find_issue_mut(key)),
            None => None,
        };
        let Some(issue) = found else {
            debug!(project, %id, "update matched no issue");
            return Err(IssueError::CouldNotUpdate { id });
        };

        if !update.rejected.is_empty() {
            debug!(project, %id, rejected = ?update.rejected, "update carried unreadable values");
            return Err(IssueError::CouldNotUpdate { id });
        }

        let changed: Vec<_> = update
            .changes
            .iter()
            .filter(|change| change.apply(issue))
            .map(|change| change.field().as_str())
            .collect();
        issue.updated_on = now;
        debug!(project, id = %issue.id, ?changed, "updated issue");

        Ok(issue.clone())
    }

    /// Remove the first issue in `project` whose id matches `_id`.
    ///
    /// # Errors
    ///
    /// Returns `MissingId` or `CouldNotDelete`.
    pub fn delete_issue(&mut self, project: &str, fields: &Fields) -> Result<Issue> {
        let Some(id) = submitted_id(fields).cloned() else {
            return Err(IssueError::MissingId);
        };

        let found = value_text(&id).and_then(|key| {
            let p = self.repo.find_project_mut(project)?;
            let index = p.position_of(&key)?;
            Some(p.issues.remove(index))
        });

        match found {
            Some(issue) => {
                debug!(project, id = %issue.id, "deleted issue");
                Ok(issue)
            }
            None => {
                debug!(project, %id, "delete matched no issue");
                Err(IssueError::CouldNotDelete { id })
            }
        }
    }
}
