//! Service layer orchestrating candidate confirm, edit, ignore, and source
//! lookup.

use crate::candidate::{
    domain::{
        CandidateDomainError, CandidateId, EditCandidate, SourceMessageId, SourceSnippet,
        TaskCandidate,
    },
    ports::{
        CandidateRepository, CandidateRepositoryError, SourceMessageError,
        SourceMessageRepository,
    },
};
use crate::identity::domain::UserId;
use crate::patch::Patch;
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskKind},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Caller-supplied overrides merged over candidate fields at confirm time.
///
/// `title` and `kind` override when present; `module` and `due_date` are
/// tri-state (omitted falls back to the candidate, explicit `null` clears);
/// `notes` exists only on tasks and so is taken from the override alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfirmOverrides {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement category.
    #[serde(rename = "type")]
    pub kind: Option<TaskKind>,
    /// Module patch resolved against the candidate's module.
    #[serde(default)]
    pub module: Patch<String>,
    /// Due-date patch resolved against the candidate's due date.
    #[serde(default)]
    pub due_date: Patch<DateTime<Utc>>,
    /// Notes for the created task.
    pub notes: Option<String>,
}

/// Dismissal rationale, logged for analytics and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The extraction was not actually a task.
    NotATask,
    /// A candidate for the same task already exists.
    Duplicate,
    /// The source message was unsolicited bulk mail.
    Spam,
    /// Any other reason.
    Other,
}

impl IgnoreReason {
    /// Returns the canonical label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotATask => "not_a_task",
            Self::Duplicate => "duplicate",
            Self::Spam => "spam",
            Self::Other => "other",
        }
    }
}

/// Outcome of a successful confirm: the created task and the updated
/// candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    /// Task materialised from the candidate.
    pub task: Task,
    /// Candidate in its post-confirm state.
    pub candidate: TaskCandidate,
}

/// Service-level errors for candidate triage operations.
#[derive(Debug, Error)]
pub enum CandidateLifecycleError {
    /// No candidate matches the id within the caller's rows.
    #[error("candidate not found: {0}")]
    NotFound(CandidateId),
    /// The candidate's source message no longer exists.
    #[error("source message not found: {0}")]
    SourceNotFound(SourceMessageId),
    /// Candidate domain validation failed.
    #[error(transparent)]
    Domain(#[from] CandidateDomainError),
    /// Task construction failed.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),
    /// Candidate store operation failed.
    #[error(transparent)]
    CandidateRepository(#[from] CandidateRepositoryError),
    /// Task store operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Source-message lookup failed.
    #[error(transparent)]
    Source(#[from] SourceMessageError),
}

/// Result type for candidate triage operations.
pub type CandidateLifecycleResult<T> = Result<T, CandidateLifecycleError>;

/// Candidate triage orchestration service.
#[derive(Clone)]
pub struct CandidateLifecycleService {
    candidates: Arc<dyn CandidateRepository>,
    tasks: Arc<dyn TaskRepository>,
    sources: Arc<dyn SourceMessageRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl CandidateLifecycleService {
    /// Creates a new candidate lifecycle service.
    #[must_use]
    pub const fn new(
        candidates: Arc<dyn CandidateRepository>,
        tasks: Arc<dyn TaskRepository>,
        sources: Arc<dyn SourceMessageRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            candidates,
            tasks,
            sources,
            clock,
        }
    }

    async fn fetch_owned(
        &self,
        id: CandidateId,
        owner: UserId,
    ) -> CandidateLifecycleResult<TaskCandidate> {
        self.candidates
            .find_by_id(id, owner)
            .await?
            .ok_or(CandidateLifecycleError::NotFound(id))
    }

    /// Confirms a candidate, materialising a pending task for the caller.
    ///
    /// The task insert and the candidate status update are two separate
    /// store writes with no surrounding transaction: a failure between them
    /// leaves the task in place and the candidate still `new`, so from a
    /// retrying caller's perspective the operation is at-least-once, not
    /// exactly-once. The status guard runs before the task insert, which
    /// keeps a *processed* candidate from ever spawning a second task, but
    /// two concurrent confirms of a still-`new` candidate can both pass it.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateLifecycleError::NotFound`] when no candidate
    /// matches id and owner, [`CandidateLifecycleError::Domain`] when the
    /// candidate is no longer `new`, and repository variants on store
    /// failure.
    pub async fn confirm(
        &self,
        id: CandidateId,
        owner: UserId,
        overrides: ConfirmOverrides,
    ) -> CandidateLifecycleResult<Confirmation> {
        let mut candidate = self.fetch_owned(id, owner).await?;

        let input = merge_task_input(&candidate, owner, overrides);
        // Flips the status in memory first so an already-processed
        // candidate fails here, before any store write.
        candidate.confirm(&*self.clock)?;

        let task = Task::create(input, &*self.clock)?;
        self.tasks.store(&task).await?;
        self.candidates.update(&candidate).await?;

        Ok(Confirmation { task, candidate })
    }

    /// Applies a full-replacement edit to a still-`new` candidate.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateLifecycleError::NotFound`] when no candidate
    /// matches id and owner, [`CandidateLifecycleError::Domain`] when the
    /// candidate has already been processed or the edit fails validation,
    /// and repository variants on store failure.
    pub async fn edit(
        &self,
        id: CandidateId,
        owner: UserId,
        edit: EditCandidate,
    ) -> CandidateLifecycleResult<TaskCandidate> {
        let mut candidate = self.fetch_owned(id, owner).await?;
        candidate.apply_edit(edit, &*self.clock)?;
        self.candidates.update(&candidate).await?;
        Ok(candidate)
    }

    /// Dismisses a still-`new` candidate.
    ///
    /// The optional reason is recorded in the log stream for analytics and
    /// never written to the candidate row.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateLifecycleError::NotFound`] when no candidate
    /// matches id and owner, [`CandidateLifecycleError::Domain`] when the
    /// candidate has already been processed, and repository variants on
    /// store failure.
    pub async fn ignore(
        &self,
        id: CandidateId,
        owner: UserId,
        reason: Option<IgnoreReason>,
    ) -> CandidateLifecycleResult<TaskCandidate> {
        let mut candidate = self.fetch_owned(id, owner).await?;
        candidate.ignore(&*self.clock)?;
        self.candidates.update(&candidate).await?;

        if let Some(why) = reason {
            info!(candidate_id = %id, reason = why.as_str(), "candidate ignored");
        }
        Ok(candidate)
    }

    /// Fetches the source-message snippet behind a candidate.
    ///
    /// Ownership is checked on the candidate; the snippet itself is keyed
    /// only by the candidate's source-message back-reference.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateLifecycleError::NotFound`] when no candidate
    /// matches id and owner, [`CandidateLifecycleError::SourceNotFound`]
    /// when the referenced message is gone, and repository variants on
    /// store failure.
    pub async fn source(
        &self,
        id: CandidateId,
        owner: UserId,
    ) -> CandidateLifecycleResult<SourceSnippet> {
        let candidate = self.fetch_owned(id, owner).await?;
        let message_id = candidate.source_message_id();
        self.sources
            .find_snippet(message_id)
            .await?
            .ok_or(CandidateLifecycleError::SourceNotFound(message_id))
    }
}

/// Merges candidate fields with confirm overrides into a task input.
fn merge_task_input(
    candidate: &TaskCandidate,
    owner: UserId,
    overrides: ConfirmOverrides,
) -> NewTask {
    NewTask {
        candidate_id: candidate.id(),
        owner,
        thread_id: candidate.thread_id().map(ToOwned::to_owned),
        title: overrides
            .title
            .unwrap_or_else(|| candidate.title().to_owned()),
        kind: overrides.kind.unwrap_or(candidate.kind()),
        module: overrides
            .module
            .apply(candidate.module().map(ToOwned::to_owned)),
        due_date: overrides.due_date.apply(candidate.due_date()),
        notes: overrides.notes,
        links: candidate.links().map(<[String]>::to_vec),
    }
}
