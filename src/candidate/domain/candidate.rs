//! Candidate aggregate root and its triage state machine.

use super::{
    CandidateDomainError, CandidateId, ConfidenceBand, ParseCandidateStatusError, SourceMessageId,
};
use crate::identity::domain::UserId;
use crate::patch::Patch;
use crate::task::domain::TaskKind;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Triage status of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Freshly extracted, awaiting triage.
    New,
    /// Confirmed by the owner; a task exists for it.
    Confirmed,
    /// Adjusted by the owner without confirmation.
    Edited,
    /// Dismissed by the owner.
    Ignored,
}

impl CandidateStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Confirmed => "confirmed",
            Self::Edited => "edited",
            Self::Ignored => "ignored",
        }
    }

    /// Returns `true` when the lifecycle permits moving from `self` to `to`.
    ///
    /// Only a `new` candidate may move anywhere; `edited` is a dead end for
    /// in-core writes, and `confirmed`/`ignored` are terminal.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::New, Self::Confirmed | Self::Edited | Self::Ignored)
        )
    }

    /// Returns `true` for statuses no write operation may leave.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Ignored)
    }
}

impl TryFrom<&str> for CandidateStatus {
    type Error = ParseCandidateStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "confirmed" => Ok(Self::Confirmed),
            "edited" => Ok(Self::Edited),
            "ignored" => Ok(Self::Ignored),
            _ => Err(ParseCandidateStatusError(value.to_owned())),
        }
    }
}

/// Extraction output used to create a candidate.
///
/// Produced by the (out-of-scope) ingestion pipeline; in-core it is only
/// exercised by tests seeding repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedCandidate {
    /// Owning user.
    pub owner: UserId,
    /// Message the candidate was derived from.
    pub source_message_id: SourceMessageId,
    /// Extracted category.
    pub kind: TaskKind,
    /// Extracted title.
    pub title: String,
    /// Extracted course module label, if any.
    pub module: Option<String>,
    /// Extracted due timestamp, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Extracted location, if any.
    pub location: Option<String>,
    /// Confidence band.
    pub confidence: ConfidenceBand,
    /// Numeric confidence score, if the pipeline produced one.
    pub confidence_score: Option<f64>,
    /// Opaque extraction rationale payload.
    pub extraction_reasons: Value,
    /// Links found in the source message, if any.
    pub links: Option<Vec<String>>,
    /// Opaque attachment payload, if any.
    pub attachments: Option<Value>,
    /// Conversation thread back-reference, if any.
    pub thread_id: Option<String>,
}

/// Full-replacement edit applied to a candidate during triage.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditCandidate {
    /// Replacement title.
    pub title: String,
    /// Replacement category.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Module patch.
    #[serde(default)]
    pub module: Patch<String>,
    /// Due-date patch.
    #[serde(default)]
    pub due_date: Patch<DateTime<Utc>>,
    /// Location patch.
    #[serde(default)]
    pub location: Patch<String>,
}

/// Parameter object for reconstructing a persisted candidate aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedCandidateData {
    /// Persisted candidate identifier.
    pub id: CandidateId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted source-message back-reference.
    pub source_message_id: SourceMessageId,
    /// Persisted category.
    pub kind: TaskKind,
    /// Persisted title.
    pub title: String,
    /// Persisted module label.
    pub module: Option<String>,
    /// Persisted due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted location.
    pub location: Option<String>,
    /// Persisted confidence band.
    pub confidence: ConfidenceBand,
    /// Persisted confidence score.
    pub confidence_score: Option<f64>,
    /// Persisted extraction rationale payload.
    pub extraction_reasons: Value,
    /// Persisted links.
    pub links: Option<Vec<String>>,
    /// Persisted attachment payload.
    pub attachments: Option<Value>,
    /// Persisted triage status.
    pub status: CandidateStatus,
    /// Persisted thread back-reference.
    pub thread_id: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Candidate aggregate root.
///
/// The owner is immutable after creation, and every status write goes
/// through the [`CandidateStatus::can_transition_to`] guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCandidate {
    id: CandidateId,
    #[serde(rename = "owner_id")]
    owner: UserId,
    source_message_id: SourceMessageId,
    #[serde(rename = "type")]
    kind: TaskKind,
    title: String,
    module: Option<String>,
    due_date: Option<DateTime<Utc>>,
    location: Option<String>,
    confidence: ConfidenceBand,
    confidence_score: Option<f64>,
    extraction_reasons: Value,
    links: Option<Vec<String>>,
    attachments: Option<Value>,
    status: CandidateStatus,
    thread_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskCandidate {
    /// Creates a `new`-status candidate from extraction output.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateDomainError::EmptyTitle`] when the extracted
    /// title is empty after trimming.
    pub fn from_extraction(
        input: ExtractedCandidate,
        clock: &dyn Clock,
    ) -> Result<Self, CandidateDomainError> {
        let title = validated_title(input.title)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: CandidateId::new(),
            owner: input.owner,
            source_message_id: input.source_message_id,
            kind: input.kind,
            title,
            module: input.module,
            due_date: input.due_date,
            location: input.location,
            confidence: input.confidence,
            confidence_score: input.confidence_score,
            extraction_reasons: input.extraction_reasons,
            links: input.links,
            attachments: input.attachments,
            status: CandidateStatus::New,
            thread_id: input.thread_id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a candidate from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCandidateData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            source_message_id: data.source_message_id,
            kind: data.kind,
            title: data.title,
            module: data.module,
            due_date: data.due_date,
            location: data.location,
            confidence: data.confidence,
            confidence_score: data.confidence_score,
            extraction_reasons: data.extraction_reasons,
            links: data.links,
            attachments: data.attachments,
            status: data.status,
            thread_id: data.thread_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the candidate identifier.
    #[must_use]
    pub const fn id(&self) -> CandidateId {
        self.id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the source-message back-reference.
    #[must_use]
    pub const fn source_message_id(&self) -> SourceMessageId {
        self.source_message_id
    }

    /// Returns the category.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
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

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the confidence band.
    #[must_use]
    pub const fn confidence(&self) -> ConfidenceBand {
        self.confidence
    }

    /// Returns the numeric confidence score, if any.
    #[must_use]
    pub const fn confidence_score(&self) -> Option<f64> {
        self.confidence_score
    }

    /// Returns the opaque extraction rationale payload.
    #[must_use]
    pub const fn extraction_reasons(&self) -> &Value {
        &self.extraction_reasons
    }

    /// Returns the extracted links, if any.
    #[must_use]
    pub fn links(&self) -> Option<&[String]> {
        self.links.as_deref()
    }

    /// Returns the opaque attachment payload, if any.
    #[must_use]
    pub const fn attachments(&self) -> Option<&Value> {
        self.attachments.as_ref()
    }

    /// Returns the triage status.
    #[must_use]
    pub const fn status(&self) -> CandidateStatus {
        self.status
    }

    /// Returns the thread back-reference, if any.
    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the candidate confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateDomainError::InvalidStatusTransition`] unless the
    /// candidate is still `new`.
    pub fn confirm(&mut self, clock: &dyn Clock) -> Result<(), CandidateDomainError> {
        self.transition_to(CandidateStatus::Confirmed, clock)
    }

    /// Applies a full-replacement edit and marks the candidate edited.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateDomainError::InvalidStatusTransition`] unless the
    /// candidate is still `new`, and [`CandidateDomainError::EmptyTitle`]
    /// when the replacement title is empty after trimming. A rejected edit
    /// leaves the candidate unchanged.
    pub fn apply_edit(
        &mut self,
        edit: EditCandidate,
        clock: &dyn Clock,
    ) -> Result<(), CandidateDomainError> {
        if !self.status.can_transition_to(CandidateStatus::Edited) {
            return Err(self.rejected_transition(CandidateStatus::Edited));
        }
        let title = validated_title(edit.title)?;

        self.title = title;
        self.kind = edit.kind;
        self.module = edit.module.apply(self.module.take());
        self.due_date = edit.due_date.apply(self.due_date.take());
        self.location = edit.location.apply(self.location.take());
        self.status = CandidateStatus::Edited;
        self.touch(clock);
        Ok(())
    }

    /// Marks the candidate ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateDomainError::InvalidStatusTransition`] unless the
    /// candidate is still `new`.
    pub fn ignore(&mut self, clock: &dyn Clock) -> Result<(), CandidateDomainError> {
        self.transition_to(CandidateStatus::Ignored, clock)
    }

    /// Moves the candidate to `to` when the state machine permits it.
    fn transition_to(
        &mut self,
        to: CandidateStatus,
        clock: &dyn Clock,
    ) -> Result<(), CandidateDomainError> {
        if !self.status.can_transition_to(to) {
            return Err(self.rejected_transition(to));
        }
        self.status = to;
        self.touch(clock);
        Ok(())
    }

    fn rejected_transition(&self, to: CandidateStatus) -> CandidateDomainError {
        CandidateDomainError::InvalidStatusTransition {
            candidate_id: self.id,
            from: self.status,
            to,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = clock.utc();
    }
}

/// Validates and normalises a candidate title.
fn validated_title(title: String) -> Result<String, CandidateDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CandidateDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
