//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Confirming candidate back-reference.
    pub candidate_id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Optional conversation thread back-reference.
    pub thread_id: Option<String>,
    /// Task title.
    pub title: String,
    /// Task category.
    pub kind: String,
    /// Optional course module label.
    pub module: Option<String>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Optional reference links.
    pub links: Option<Value>,
    /// Task lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Confirming candidate back-reference.
    pub candidate_id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Optional conversation thread back-reference.
    pub thread_id: Option<String>,
    /// Task title.
    pub title: String,
    /// Task category.
    pub kind: String,
    /// Optional course module label.
    pub module: Option<String>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Optional reference links.
    pub links: Option<Value>,
    /// Task lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Changeset persisting the mutable columns of a task aggregate.
///
/// `None` values overwrite their columns with NULL: the aggregate is the
/// source of truth for the full row state.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task category.
    pub kind: String,
    /// Optional course module label.
    pub module: Option<String>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Optional reference links.
    pub links: Option<Value>,
    /// Task lifecycle status.
    pub status: String,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}
