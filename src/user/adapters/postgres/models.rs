//! Diesel row models for profile persistence.

use super::schema::user_profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for profile records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Provider user id.
    pub id: uuid::Uuid,
    /// Account email.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
pub struct NewProfileRow {
    /// Provider user id.
    pub id: uuid::Uuid,
    /// Account email.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset persisting the mutable columns of a profile.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_profiles)]
pub struct ProfileChangeset {
    /// Account email.
    pub email: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
