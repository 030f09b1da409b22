//! Diesel row models for candidate persistence.

use super::schema::{source_messages, task_candidates};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for candidate records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CandidateRow {
    /// Internal candidate identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Source message back-reference.
    pub source_message_id: uuid::Uuid,
    /// Candidate category.
    pub kind: String,
    /// Candidate title.
    pub title: String,
    /// Optional course module label.
    pub module: Option<String>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional location.
    pub location: Option<String>,
    /// Confidence band.
    pub confidence: String,
    /// Optional numeric confidence score.
    pub confidence_score: Option<f64>,
    /// Opaque extraction rationale payload.
    pub extraction_reasons: Value,
    /// Optional extracted links.
    pub links: Option<Value>,
    /// Optional attachment payload.
    pub attachments: Option<Value>,
    /// Triage status.
    pub status: String,
    /// Optional conversation thread back-reference.
    pub thread_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for candidate records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_candidates)]
pub struct NewCandidateRow {
    /// Internal candidate identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Source message back-reference.
    pub source_message_id: uuid::Uuid,
    /// Candidate category.
    pub kind: String,
    /// Candidate title.
    pub title: String,
    /// Optional course module label.
    pub module: Option<String>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional location.
    pub location: Option<String>,
    /// Confidence band.
    pub confidence: String,
    /// Optional numeric confidence score.
    pub confidence_score: Option<f64>,
    /// Opaque extraction rationale payload.
    pub extraction_reasons: Value,
    /// Optional extracted links.
    pub links: Option<Value>,
    /// Optional attachment payload.
    pub attachments: Option<Value>,
    /// Triage status.
    pub status: String,
    /// Optional conversation thread back-reference.
    pub thread_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset persisting the mutable columns of a candidate aggregate.
///
/// `None` values overwrite their columns with NULL: the aggregate is the
/// source of truth for the full row state. Owner, source reference, and
/// extraction payloads are immutable and stay out of the changeset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_candidates)]
#[diesel(treat_none_as_null = true)]
pub struct CandidateChangeset {
    /// Candidate category.
    pub kind: String,
    /// Candidate title.
    pub title: String,
    /// Optional course module label.
    pub module: Option<String>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional location.
    pub location: Option<String>,
    /// Triage status.
    pub status: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for source-message snippets.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = source_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SourceMessageRow {
    /// Message subject line.
    pub subject: String,
    /// Optional sender display name.
    pub from_name: Option<String>,
    /// Sender address.
    pub from_email: String,
    /// Time the message was received.
    pub received_at: DateTime<Utc>,
    /// Leading excerpt of the message body.
    pub body_snippet: String,
    /// URLs extracted from the message body.
    pub urls: Value,
}
