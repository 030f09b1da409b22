//! Repository port for owner-scoped task persistence.

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskId, TaskKind, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Filter and paging options for task listings.
///
/// Listings always order by due date ascending with undated tasks last;
/// filters narrow the owner's rows, never widen them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Restrict to one lifecycle status.
    pub status: Option<TaskStatus>,
    /// Restrict to one category.
    pub kind: Option<TaskKind>,
    /// Maximum number of rows to return.
    pub limit: Option<i64>,
    /// Number of rows to skip.
    pub offset: Option<i64>,
    /// Restrict to tasks that carry a due date.
    pub scheduled_only: bool,
}

impl TaskQuery {
    /// Restricts the query to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the query to one category.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub const fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Restricts the query to tasks with a due date.
    #[must_use]
    pub const fn scheduled_only(mut self) -> Self {
        self.scheduled_only = true;
        self
    }
}

/// Task persistence contract.
///
/// Every operation filters by owner id; no call may touch another owner's
/// rows. A missing row surfaces as `Ok(None)` from finders and as
/// [`TaskRepositoryError::NotFound`] from updates.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task, matching on id and owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row matches.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier within the owner's rows.
    ///
    /// Returns `None` when no row matches id and owner.
    async fn find_by_id(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists the owner's tasks, filtered and ordered per the query.
    async fn list(&self, owner: UserId, query: TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task within the owner's rows.
    ///
    /// Deleting an absent row succeeds silently.
    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found for the given id and owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
