//! Service layer for task retrieval, update, completion, and deletion.

use crate::identity::domain::UserId;
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskKind, TaskStatus, TaskUpdate},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Listing filters accepted by the task collection endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListTasksRequest {
    /// Restrict to one lifecycle status.
    pub status: Option<TaskStatus>,
    /// Restrict to one category.
    #[serde(rename = "type")]
    pub kind: Option<TaskKind>,
    /// Maximum number of rows to return.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: Option<u32>,
}

impl ListTasksRequest {
    fn into_query(self) -> TaskQuery {
        TaskQuery {
            status: self.status,
            kind: self.kind,
            limit: self.limit.map(i64::from),
            offset: self.offset.map(i64::from),
            scheduled_only: false,
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task matches the id within the caller's rows.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Owner-scoped task upkeep service.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl TaskService {
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        repository: Arc<dyn TaskRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self { repository, clock }
    }

    /// Retrieves one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no row matches id and
    /// owner, and [`TaskServiceError::Repository`] on store failure.
    pub async fn get(&self, id: TaskId, owner: UserId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id, owner)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Lists the owner's tasks with optional filters, ordered by due date
    /// ascending with undated tasks last.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] on store failure.
    pub async fn list(
        &self,
        owner: UserId,
        request: ListTasksRequest,
    ) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list(owner, request.into_query()).await?)
    }

    /// Applies a partial update to one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no row matches,
    /// [`TaskServiceError::Domain`] when the update fails validation, and
    /// [`TaskServiceError::Repository`] on store failure.
    pub async fn update(
        &self,
        id: TaskId,
        owner: UserId,
        update: TaskUpdate,
    ) -> TaskServiceResult<Task> {
        let mut task = self.get(id, owner).await?;
        task.apply_update(update, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Marks one task completed.
    ///
    /// Completing an already-completed task succeeds and preserves the
    /// original completion timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no row matches and
    /// [`TaskServiceError::Repository`] on store failure.
    pub async fn complete(&self, id: TaskId, owner: UserId) -> TaskServiceResult<Task> {
        let mut task = self.get(id, owner).await?;
        task.complete(&*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes one task; deleting an absent task succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] on store failure.
    pub async fn delete(&self, id: TaskId, owner: UserId) -> TaskServiceResult<()> {
        Ok(self.repository.delete(id, owner).await?)
    }
}
