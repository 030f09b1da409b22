//! `PostgreSQL` repository implementation for candidate persistence.

use super::{
    models::{CandidateChangeset, CandidateRow, NewCandidateRow},
    schema::task_candidates,
};
use crate::candidate::{
    domain::{
        CandidateId, CandidateStatus, ConfidenceBand, PersistedCandidateData, SourceMessageId,
        TaskCandidate,
    },
    ports::{
        CandidateOrder, CandidateQuery, CandidateRepository, CandidateRepositoryError,
        CandidateRepositoryResult,
    },
};
use crate::identity::domain::UserId;
use crate::task::domain::TaskKind;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by candidate adapters.
pub type CandidatePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed candidate repository.
#[derive(Debug, Clone)]
pub struct PostgresCandidateRepository {
    pool: CandidatePgPool,
}

impl PostgresCandidateRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CandidatePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CandidateRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CandidateRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CandidateRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CandidateRepositoryError::persistence)?
    }
}

#[async_trait]
impl CandidateRepository for PostgresCandidateRepository {
    async fn store(&self, candidate: &TaskCandidate) -> CandidateRepositoryResult<()> {
        let new_row = to_new_row(candidate)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(task_candidates::table)
                .values(&new_row)
                .execute(connection)
                .map_err(CandidateRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, candidate: &TaskCandidate) -> CandidateRepositoryResult<()> {
        let candidate_id = candidate.id();
        let owner = candidate.owner();
        let changeset = to_changeset(candidate);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                task_candidates::table
                    .filter(task_candidates::id.eq(candidate_id.into_inner()))
                    .filter(task_candidates::owner_id.eq(owner.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(CandidateRepositoryError::persistence)?;

            if updated == 0 {
                return Err(CandidateRepositoryError::NotFound(candidate_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: CandidateId,
        owner: UserId,
    ) -> CandidateRepositoryResult<Option<TaskCandidate>> {
        self.run_blocking(move |connection| {
            let row = task_candidates::table
                .filter(task_candidates::id.eq(id.into_inner()))
                .filter(task_candidates::owner_id.eq(owner.into_inner()))
                .select(CandidateRow::as_select())
                .first::<CandidateRow>(connection)
                .optional()
                .map_err(CandidateRepositoryError::persistence)?;
            row.map(row_to_candidate).transpose()
        })
        .await
    }

    async fn list(
        &self,
        owner: UserId,
        query: CandidateQuery,
    ) -> CandidateRepositoryResult<Vec<TaskCandidate>> {
        self.run_blocking(move |connection| {
            let mut statement = task_candidates::table
                .filter(task_candidates::owner_id.eq(owner.into_inner()))
                .into_boxed();

            if let Some(status) = query.status {
                statement = statement.filter(task_candidates::status.eq(status.as_str()));
            }
            statement = match query.order {
                CandidateOrder::Recency => statement.order(task_candidates::created_at.desc()),
                CandidateOrder::Confidence => statement.order((
                    task_candidates::confidence_score.desc().nulls_last(),
                    task_candidates::created_at.desc(),
                )),
            };

            let rows = statement
                .select(CandidateRow::as_select())
                .load::<CandidateRow>(connection)
                .map_err(CandidateRepositoryError::persistence)?;
            rows.into_iter().map(row_to_candidate).collect()
        })
        .await
    }
}

fn to_new_row(candidate: &TaskCandidate) -> CandidateRepositoryResult<NewCandidateRow> {
    let links = candidate
        .links()
        .map(serde_json::to_value)
        .transpose()
        .map_err(CandidateRepositoryError::persistence)?;

    Ok(NewCandidateRow {
        id: candidate.id().into_inner(),
        owner_id: candidate.owner().into_inner(),
        source_message_id: candidate.source_message_id().into_inner(),
        kind: candidate.kind().as_str().to_owned(),
        title: candidate.title().to_owned(),
        module: candidate.module().map(ToOwned::to_owned),
        due_date: candidate.due_date(),
        location: candidate.location().map(ToOwned::to_owned),
        confidence: candidate.confidence().as_str().to_owned(),
        confidence_score: candidate.confidence_score(),
        extraction_reasons: candidate.extraction_reasons().clone(),
        links,
        attachments: candidate.attachments().cloned(),
        status: candidate.status().as_str().to_owned(),
        thread_id: candidate.thread_id().map(ToOwned::to_owned),
        created_at: candidate.created_at(),
        updated_at: candidate.updated_at(),
    })
}

fn to_changeset(candidate: &TaskCandidate) -> CandidateChangeset {
    CandidateChangeset {
        kind: candidate.kind().as_str().to_owned(),
        title: candidate.title().to_owned(),
        module: candidate.module().map(ToOwned::to_owned),
        due_date: candidate.due_date(),
        location: candidate.location().map(ToOwned::to_owned),
        status: candidate.status().as_str().to_owned(),
        updated_at: candidate.updated_at(),
    }
}

fn row_to_candidate(row: CandidateRow) -> CandidateRepositoryResult<TaskCandidate> {
    let CandidateRow {
        id,
        owner_id,
        source_message_id,
        kind: persisted_kind,
        title,
        module,
        due_date,
        location,
        confidence: persisted_confidence,
        confidence_score,
        extraction_reasons,
        links: persisted_links,
        attachments,
        status: persisted_status,
        thread_id,
        created_at,
        updated_at,
    } = row;

    let kind = TaskKind::try_from(persisted_kind.as_str())
        .map_err(CandidateRepositoryError::persistence)?;
    let confidence = ConfidenceBand::try_from(persisted_confidence.as_str())
        .map_err(CandidateRepositoryError::persistence)?;
    let status = CandidateStatus::try_from(persisted_status.as_str())
        .map_err(CandidateRepositoryError::persistence)?;
    let links = persisted_links
        .map(serde_json::from_value::<Vec<String>>)
        .transpose()
        .map_err(CandidateRepositoryError::persistence)?;

    let data = PersistedCandidateData {
        id: CandidateId::from_uuid(id),
        owner: UserId::from_uuid(owner_id),
        source_message_id: SourceMessageId::from_uuid(source_message_id),
        kind,
        title,
        module,
        due_date,
        location,
        confidence,
        confidence_score,
        extraction_reasons,
        links,
        attachments,
        status,
        thread_id,
        created_at,
        updated_at,
    };
    Ok(TaskCandidate::from_persisted(data))
}
