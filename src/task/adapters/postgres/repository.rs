//! `PostgreSQL` repository implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskKind, TaskStatus},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::candidate::domain::CandidateId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let new_row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let owner = task.owner();
        let changeset = to_changeset(task)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, owner: UserId, query: TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .into_boxed();

            if let Some(status) = query.status {
                statement = statement.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(kind) = query.kind {
                statement = statement.filter(tasks::kind.eq(kind.as_str()));
            }
            if query.scheduled_only {
                statement = statement.filter(tasks::due_date.is_not_null());
            }
            statement = statement.order(tasks::due_date.asc().nulls_last());
            if let Some(limit) = query.limit {
                statement = statement.limit(limit);
            }
            if let Some(offset) = query.offset {
                statement = statement.offset(offset);
            }

            let rows = statement
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Deleting an absent row is a silent success per the port
            // contract, so the affected-row count is not inspected.
            diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn links_to_value(links: Option<&[String]>) -> TaskRepositoryResult<Option<serde_json::Value>> {
    links
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        candidate_id: task.candidate_id().into_inner(),
        owner_id: task.owner().into_inner(),
        thread_id: task.thread_id().map(ToOwned::to_owned),
        title: task.title().to_owned(),
        kind: task.kind().as_str().to_owned(),
        module: task.module().map(ToOwned::to_owned),
        due_date: task.due_date(),
        notes: task.notes().map(ToOwned::to_owned),
        links: links_to_value(task.links())?,
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        completed_at: task.completed_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: task.title().to_owned(),
        kind: task.kind().as_str().to_owned(),
        module: task.module().map(ToOwned::to_owned),
        due_date: task.due_date(),
        notes: task.notes().map(ToOwned::to_owned),
        links: links_to_value(task.links())?,
        status: task.status().as_str().to_owned(),
        completed_at: task.completed_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        candidate_id,
        owner_id,
        thread_id,
        title,
        kind: persisted_kind,
        module,
        due_date,
        notes,
        links: persisted_links,
        status: persisted_status,
        created_at,
        completed_at,
    } = row;

    let kind =
        TaskKind::try_from(persisted_kind.as_str()).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let links = persisted_links
        .map(serde_json::from_value::<Vec<String>>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        candidate_id: CandidateId::from_uuid(candidate_id),
        owner: UserId::from_uuid(owner_id),
        thread_id,
        title,
        kind,
        module,
        due_date,
        notes,
        links,
        status,
        created_at,
        completed_at,
    };
    Ok(Task::from_persisted(data))
}
