//! `PostgreSQL` repository implementation for profile persistence.

use super::{
    models::{NewProfileRow, ProfileChangeset, ProfileRow},
    schema::user_profiles,
};
use crate::identity::domain::UserId;
use crate::user::{
    domain::{PersistedProfileData, UserProfile},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &UserProfile) -> ProfileRepositoryResult<()> {
        let new_row = NewProfileRow {
            id: profile.id().into_inner(),
            email: profile.email().to_owned(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(user_profiles::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &UserProfile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let changeset = ProfileChangeset {
            email: profile.email().to_owned(),
            updated_at: profile.updated_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                user_profiles::table.filter(user_profiles::id.eq(profile_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(ProfileRepositoryError::persistence)?;

            if updated == 0 {
                return Err(ProfileRepositoryError::NotFound(profile_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> ProfileRepositoryResult<Option<UserProfile>> {
        self.run_blocking(move |connection| {
            let row = user_profiles::table
                .filter(user_profiles::id.eq(id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(row.map(row_to_profile))
        })
        .await
    }

    async fn delete(&self, id: UserId) -> ProfileRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(user_profiles::table.filter(user_profiles::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn row_to_profile(row: ProfileRow) -> UserProfile {
    UserProfile::from_persisted(PersistedProfileData {
        id: UserId::from_uuid(row.id),
        email: row.email,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
