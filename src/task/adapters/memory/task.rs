//! In-memory repository for task service tests.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Orders tasks by due date ascending with undated tasks last.
fn due_date_order(a: &Task, b: &Task) -> Ordering {
    match (a.due_date(), b.due_date()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn matches_query(task: &Task, query: TaskQuery) -> bool {
    if query.status.is_some_and(|status| task.status() != status) {
        return false;
    }
    if query.kind.is_some_and(|kind| task.kind() != kind) {
        return false;
    }
    if query.scheduled_only && task.due_date().is_none() {
        return false;
    }
    true
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let matches_owner = state
            .get(&task.id())
            .is_some_and(|existing| existing.owner() == task.owner());
        if !matches_owner {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|task| task.owner() == owner)
            .cloned())
    }

    async fn list(&self, owner: UserId, query: TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| task.owner() == owner && matches_query(task, query))
            .cloned()
            .collect();
        tasks.sort_by(due_date_order);

        let offset = usize::try_from(query.offset.unwrap_or(0)).unwrap_or(0);
        if offset > 0 {
            tasks.drain(..offset.min(tasks.len()));
        }
        if let Some(limit) = query.limit {
            tasks.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(tasks)
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let owned = state.get(&id).is_some_and(|task| task.owner() == owner);
        if owned {
            state.remove(&id);
        }
        Ok(())
    }
}
