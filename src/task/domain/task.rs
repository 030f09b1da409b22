//! Task aggregate root and related lifecycle types.

use super::{ParseTaskStatusError, TaskDomainError, TaskId, TaskKind};
use crate::candidate::domain::CandidateId;
use crate::identity::domain::UserId;
use crate::patch::Patch;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open and actionable.
    Pending,
    /// Task has been completed by its owner.
    Completed,
    /// Task has been called off without completion.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Creation input assembled by the candidate confirm flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Candidate this task was confirmed from (1:1).
    pub candidate_id: CandidateId,
    /// Verified owner of the task.
    pub owner: UserId,
    /// Conversation thread copied from the candidate, if any.
    pub thread_id: Option<String>,
    /// Task title.
    pub title: String,
    /// Task category.
    pub kind: TaskKind,
    /// Course module label, if any.
    pub module: Option<String>,
    /// Due timestamp, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form notes supplied at confirm time.
    pub notes: Option<String>,
    /// Reference links carried over from extraction.
    pub links: Option<Vec<String>>,
}

/// Partial update applied to an existing task.
///
/// Nullable fields use [`Patch`] so an omitted key, an explicit `null`, and
/// a replacement value stay distinguishable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement category.
    #[serde(rename = "type")]
    pub kind: Option<TaskKind>,
    /// Module patch.
    #[serde(default)]
    pub module: Patch<String>,
    /// Due-date patch.
    #[serde(default)]
    pub due_date: Patch<DateTime<Utc>>,
    /// Notes patch.
    #[serde(default)]
    pub notes: Patch<String>,
    /// Replacement link list.
    pub links: Option<Vec<String>>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted candidate back-reference.
    pub candidate_id: CandidateId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted thread back-reference.
    pub thread_id: Option<String>,
    /// Persisted title.
    pub title: String,
    /// Persisted category.
    pub kind: TaskKind,
    /// Persisted module label.
    pub module: Option<String>,
    /// Persisted due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted notes.
    pub notes: Option<String>,
    /// Persisted link list.
    pub links: Option<Vec<String>>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Task aggregate root.
///
/// Invariant: `completed_at` is set iff `status == Completed`; every status
/// write goes through [`Task::set_status`] to keep the pair consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    candidate_id: CandidateId,
    #[serde(rename = "owner_id")]
    owner: UserId,
    thread_id: Option<String>,
    title: String,
    #[serde(rename = "type")]
    kind: TaskKind,
    module: Option<String>,
    due_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    links: Option<Vec<String>>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a pending task from confirm-flow input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn create(input: NewTask, clock: &dyn Clock) -> Result<Self, TaskDomainError> {
        let title = validated_title(input.title)?;
        Ok(Self {
            id: TaskId::new(),
            candidate_id: input.candidate_id,
            owner: input.owner,
            thread_id: input.thread_id,
            title,
            kind: input.kind,
            module: input.module,
            due_date: input.due_date,
            notes: input.notes,
            links: input.links,
            status: TaskStatus::Pending,
            created_at: clock.utc(),
            completed_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            candidate_id: data.candidate_id,
            owner: data.owner,
            thread_id: data.thread_id,
            title: data.title,
            kind: data.kind,
            module: data.module,
            due_date: data.due_date,
            notes: data.notes,
            links: data.links,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the confirming candidate's identifier.
    #[must_use]
    pub const fn candidate_id(&self) -> CandidateId {
        self.candidate_id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the conversation thread back-reference, if any.
    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the module label, if any.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the reference links, if any.
    #[must_use]
    pub fn links(&self) -> Option<&[String]> {
        self.links.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Marks the task completed.
    ///
    /// Completing an already-completed task is a no-op: the original
    /// completion timestamp is preserved.
    pub fn complete(&mut self, clock: &dyn Clock) {
        self.set_status(TaskStatus::Completed, clock);
    }

    /// Applies a partial update, keeping the completion invariant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when a replacement title is
    /// empty after trimming.
    pub fn apply_update(
        &mut self,
        update: TaskUpdate,
        clock: &dyn Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(title) = update.title {
            self.title = validated_title(title)?;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        self.module = update.module.apply(self.module.take());
        self.due_date = update.due_date.apply(self.due_date.take());
        self.notes = update.notes.apply(self.notes.take());
        if let Some(links) = update.links {
            self.links = Some(links);
        }
        if let Some(status) = update.status {
            self.set_status(status, clock);
        }
        Ok(())
    }

    /// Sets the status while keeping `completed_at` consistent with it.
    fn set_status(&mut self, status: TaskStatus, clock: &dyn Clock) {
        if status == TaskStatus::Completed {
            if self.status != TaskStatus::Completed {
                self.completed_at = Some(clock.utc());
            }
        } else {
            self.completed_at = None;
        }
        self.status = status;
    }
}

/// Validates and normalises a task title.
fn validated_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
